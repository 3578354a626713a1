mod logging;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use probstat_common::Config;
use probstat_core::{
    page_to_json, render_page, render_simulation, write_figure, write_page, TrialCount, Upload,
    WidgetState,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, time::Duration};
use tui::app::{make_rng, App, Focus, StatusLevel};
use tui::events::handle_key;
use tui::ui::render;

fn parse_trials(s: &str) -> Result<TrialCount, String> { // validate trial count at CLI parse time
    s.parse::<TrialCount>().map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "probstat", version, about = "Probability and statistics explorer: CSV histograms and coin-flip simulation")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive page (default)
    View {
        path: Option<PathBuf>,
        #[arg(long)] column: Option<String>,
        #[arg(long, value_parser = parse_trials)] trials: Option<TrialCount>,
        #[arg(long)] seed: Option<u64>,
        #[arg(long)] watch: bool,
    },
    /// Render one page cycle to stdout
    Render {
        path: PathBuf,
        #[arg(long)] column: Option<String>,
        #[arg(long, value_parser = parse_trials)] trials: Option<TrialCount>,
        #[arg(long)] seed: Option<u64>,
        #[arg(long)] json: bool,
    },
    /// Run only the coin-flip simulation
    Simulate {
        #[arg(long, value_parser = parse_trials)] trials: Option<TrialCount>,
        #[arg(long)] seed: Option<u64>,
        #[arg(long)] json: bool,
    },
    /// Print shell completions
    Completions { shell: clap_complete::Shell },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config ignored: {e}");
            Config::default()
        }
    };
    let _log_guard = logging::init_logging(&config);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "probstat starting");
    let default_trials = TrialCount::clamped(config.simulation.default_trials as i64);
    match cli.command {
        None => run_view(None, None, None, None, false, config)?,
        Some(Commands::View { path, column, trials, seed, watch }) => run_view(path, column, trials, seed, watch, config)?,
        Some(Commands::Render { path, column, trials, seed, json }) => {
            run_render(path, column, trials.unwrap_or(default_trials), seed, json, &config)?
        }
        Some(Commands::Simulate { trials, seed, json }) => run_simulate(trials.unwrap_or(default_trials), seed, json)?,
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "probstat", &mut io::stdout());
        }
    }
    Ok(())
}

fn run_render(path: PathBuf, column: Option<String>, trials: TrialCount, seed: Option<u64>, json: bool, config: &Config) -> anyhow::Result<()> {
    if !path.exists() { anyhow::bail!("file not found: {}", path.display()); }
    let state = WidgetState {
        upload: Some(Upload::from_path(&path)?),
        selected_column: column,
        trials,
    };
    let page = render_page(&state, config, &mut make_rng(seed))?;
    if json {
        println!("{}", page_to_json(&page)?);
    } else {
        write_page(&mut io::stdout().lock(), &page)?;
    }
    Ok(())
}

fn run_simulate(trials: TrialCount, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let section = render_simulation(trials, &mut make_rng(seed));
    if json {
        println!("{}", serde_json::to_string_pretty(&section)?);
    } else {
        println!("{:<10} {}", "trials:", section.trials);
        for e in &section.outcome.counts {
            println!("{:<10} {} ({:.1}%)", format!("{}:", e.value), e.count, e.percentage);
        }
        println!();
        write_figure(&mut io::stdout().lock(), &section.figure)?;
    }
    Ok(())
}

fn run_view(path: Option<PathBuf>, column: Option<String>, trials: Option<TrialCount>, seed: Option<u64>, watch: bool, config: Config) -> anyhow::Result<()> {
    let mut app = App::new(config, seed);
    if let Some(t) = trials { app.widgets.trials = t; }
    if watch { app.enable_watch(); }
    if let Some(p) = &path {
        app.open_upload(p)?;
    }
    if let Some(c) = column {
        app.select_column(c);
    }
    app.rerender();
    app.set_status(StatusLevel::Info, "Ready");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick = Duration::from_millis(66); // 15Hz
    let result = (|| -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| render(f, &app))?;
            app.poll_watch();
            if event::poll(tick)? {
                match event::read()? {
                    Event::Key(key) => handle_key(&mut app, key),
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::ScrollDown => {
                            if app.focus == Focus::Columns { app.column_down(); }
                            else { app.table_scroll_y += 1; }
                        }
                        MouseEventKind::ScrollUp => {
                            if app.focus == Focus::Columns { app.column_up(); }
                            else { app.table_scroll_y = app.table_scroll_y.saturating_sub(1); }
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }
            if app.should_quit { break; }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    tracing::info!("probstat exiting");
    result
}
