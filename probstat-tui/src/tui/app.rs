use crate::tui::theme::Theme;
use crate::tui::watch::FileWatch;
use probstat_common::Config;
use probstat_core::{render_page, Page, TrialCount, Upload, WidgetState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Columns,
    Table,
    Trials,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    None,
    Help,
    OpenFile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub widgets: WidgetState,
    pub page: Option<Page>,
    pub fault: Option<String>, // set when the last render cycle aborted
    pub focus: Focus,
    pub overlay: Overlay,
    pub path_input: String,
    pub column_cursor: usize,
    pub table_scroll_x: usize,
    pub table_scroll_y: usize,
    pub selector_width: u16,
    pub status_msg: String,
    pub status_level: StatusLevel,
    pub should_quit: bool,
    pub watch_enabled: bool,
    pub upload_path: Option<PathBuf>,
    watch: Option<FileWatch>,
    rng: StdRng,
}

impl App {
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let selector_width = config.display.selector_width.unwrap_or(28);
        Self {
            widgets: WidgetState {
                trials: TrialCount::clamped(config.simulation.default_trials as i64),
                ..WidgetState::default()
            },
            page: None,
            fault: None,
            focus: Focus::Columns,
            overlay: Overlay::None,
            path_input: String::new(),
            column_cursor: 0,
            table_scroll_x: 0,
            table_scroll_y: 0,
            selector_width,
            status_msg: String::from("Ready"),
            status_level: StatusLevel::Info,
            should_quit: false,
            watch_enabled: false,
            upload_path: None,
            watch: None,
            rng: make_rng(seed),
            theme: Theme::from_name(&config.display.theme),
            config,
        }
    }

    /// One full render cycle from the current widget state.
    pub fn rerender(&mut self) {
        match render_page(&self.widgets, &self.config, &mut self.rng) {
            Ok(page) => {
                self.page = Some(page);
                self.fault = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "render cycle aborted");
                self.page = None;
                self.fault = Some(e.to_string());
            }
        }
    }

    pub fn set_status(&mut self, level: StatusLevel, msg: impl Into<String>) {
        self.status_level = level;
        self.status_msg = msg.into();
    }

    pub fn column_options(&self) -> &[String] {
        self.page
            .as_ref()
            .and_then(|p| p.dataset.as_ref())
            .map(|d| d.column_options.as_slice())
            .unwrap_or(&[])
    }

    pub fn open_upload(&mut self, path: &Path) -> probstat_common::Result<()> {
        let upload = Upload::from_path(path)?;
        tracing::info!(path = %path.display(), bytes = upload.bytes.len(), "file uploaded");
        self.widgets.upload = Some(upload);
        self.widgets.selected_column = None;
        self.column_cursor = 0;
        self.table_scroll_x = 0;
        self.table_scroll_y = 0;
        self.upload_path = Some(path.to_path_buf());
        if self.watch_enabled {
            self.start_watch();
        }
        self.rerender();
        self.set_status(StatusLevel::Success, format!("Loaded {}", path.display()));
        Ok(())
    }

    pub fn clear_upload(&mut self) {
        self.widgets.upload = None;
        self.widgets.selected_column = None;
        self.upload_path = None;
        self.watch = None;
        self.column_cursor = 0;
        self.rerender();
        self.set_status(StatusLevel::Info, "Upload cleared");
    }

    pub fn select_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if let Some(idx) = self.column_options().iter().position(|c| *c == name) {
            self.column_cursor = idx;
        }
        self.widgets.selected_column = Some(name);
        self.rerender();
    }

    pub fn column_down(&mut self) {
        let opts = self.column_options();
        if self.column_cursor + 1 < opts.len() {
            let name = opts[self.column_cursor + 1].clone();
            self.select_column(name);
        }
    }

    pub fn column_up(&mut self) {
        if self.column_cursor > 0 {
            if let Some(name) = self.column_options().get(self.column_cursor - 1).cloned() {
                self.select_column(name);
            }
        }
    }

    pub fn set_trials(&mut self, trials: TrialCount) {
        if trials != self.widgets.trials {
            self.widgets.trials = trials;
            self.rerender();
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Columns => Focus::Table,
            Focus::Table => Focus::Trials,
            Focus::Trials => Focus::Columns,
        };
    }

    pub fn enable_watch(&mut self) {
        self.watch_enabled = true;
        self.start_watch();
    }

    fn start_watch(&mut self) {
        let Some(path) = self.upload_path.clone() else { return };
        match FileWatch::new(&path) {
            Ok(w) => self.watch = Some(w),
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "file watch unavailable");
                self.set_status(StatusLevel::Warning, format!("watch error: {e}"));
            }
        }
    }

    /// Re-reads the upload if the watched file changed; true when it did.
    pub fn poll_watch(&mut self) -> bool {
        let changed = self.watch.as_ref().map(|w| w.changed()).unwrap_or(false);
        if changed {
            self.reload_upload();
        }
        changed
    }

    /// Reads the upload path again and re-renders. On a read failure the
    /// previous page stays on screen.
    pub fn reload_upload(&mut self) {
        let Some(path) = self.upload_path.clone() else { return };
        match Upload::from_path(&path) {
            Ok(upload) => {
                tracing::info!(path = %path.display(), "upload changed on disk");
                self.widgets.upload = Some(upload);
                self.rerender();
                self.set_status(StatusLevel::Success, format!("Reloaded {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "reload failed");
                self.set_status(StatusLevel::Error, format!("reload error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn fixture(body: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        tmp.write_all(body.as_bytes()).unwrap();
        tmp
    }

    fn app() -> App {
        let mut app = App::new(Config::default(), Some(1));
        app.rerender();
        app
    }

    #[test]
    fn starts_with_default_trials_and_no_dataset() {
        let app = app();
        assert_eq!(app.widgets.trials.get(), 1000);
        let page = app.page.as_ref().unwrap();
        assert!(page.dataset.is_none());
        assert_eq!(page.simulation.outcome.trials, 1000);
    }

    #[test]
    fn column_navigation_rerenders_histogram() {
        let tmp = fixture("a,b\n1,10\n2,20\n3,30\n");
        let mut app = app();
        app.open_upload(tmp.path()).unwrap();
        assert_eq!(app.column_options(), &["a".to_string(), "b".to_string()]);
        app.column_down();
        assert_eq!(app.column_cursor, 1);
        let ds = app.page.as_ref().unwrap().dataset.as_ref().unwrap();
        assert_eq!(ds.selected_column, "b");
        app.column_down();
        assert_eq!(app.column_cursor, 1);
        app.column_up();
        assert_eq!(app.widgets.selected_column.as_deref(), Some("a"));
    }

    #[test]
    fn malformed_upload_sets_fault() {
        let tmp = fixture("a,b\n1,2,3\n");
        let mut app = app();
        app.open_upload(tmp.path()).unwrap();
        assert!(app.page.is_none());
        assert!(app.fault.is_some());
        app.clear_upload();
        assert!(app.fault.is_none());
        assert!(app.page.is_some());
    }

    #[test]
    fn non_csv_path_is_refused() {
        let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        tmp.write_all(b"a\n1\n").unwrap();
        let mut app = app();
        assert!(app.open_upload(tmp.path()).is_err());
        assert!(app.widgets.upload.is_none());
    }

    #[test]
    fn set_trials_rerenders_simulation() {
        let mut app = app();
        app.set_trials(TrialCount::new(3).unwrap());
        assert_eq!(app.page.as_ref().unwrap().simulation.figure.total(), 3);
    }

    #[test]
    fn focus_cycles_through_panels() {
        let mut app = app();
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Table);
        app.cycle_focus();
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Columns);
    }

    fn row_count(app: &App) -> usize {
        app.page.as_ref().and_then(|p| p.dataset.as_ref()).map(|d| d.table.row_count()).unwrap_or(0)
    }

    #[test]
    fn loaded_upload_reports_success() {
        let tmp = fixture("a\n1\n");
        let mut app = app();
        app.open_upload(tmp.path()).unwrap();
        assert_eq!(app.status_level, StatusLevel::Success);
        assert!(app.status_msg.starts_with("Loaded"));
    }

    #[test]
    fn watched_file_rewrite_rerenders_page() {
        let tmp = fixture("a,b\n1,10\n");
        let mut app = app();
        app.open_upload(tmp.path()).unwrap();
        app.enable_watch();
        assert!(app.watch.is_some(), "watch failed: {}", app.status_msg);
        assert_eq!(row_count(&app), 1);

        std::fs::write(tmp.path(), "a,b\n1,10\n2,20\n3,30\n").unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut fired = false;
        while Instant::now() < deadline {
            if app.poll_watch() {
                fired = true;
                // writes can arrive as several events; wait for the last one
                std::thread::sleep(Duration::from_millis(200));
                app.poll_watch();
                break;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(fired, "no change event within 5s");
        assert_eq!(row_count(&app), 3);
        assert!(app.status_msg.starts_with("Reloaded"));
        assert!(!app.poll_watch());
    }

    #[test]
    fn failed_reload_keeps_previous_page() {
        let tmp = fixture("a\n1\n2\n");
        let path = tmp.path().to_path_buf();
        let mut app = app();
        app.open_upload(&path).unwrap();
        drop(tmp);
        app.reload_upload();
        assert_eq!(row_count(&app), 2);
        assert_eq!(app.status_level, StatusLevel::Error);
        assert!(app.status_msg.starts_with("reload error"));
    }

    #[test]
    fn reload_without_upload_is_noop() {
        let mut app = app();
        app.reload_upload();
        assert_eq!(app.status_msg, "Ready");
        assert!(!app.poll_watch());
    }
}
