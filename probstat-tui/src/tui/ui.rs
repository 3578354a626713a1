use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use probstat_core::{DatasetSection, Figure, FigureKind, HistogramPanel, Page};
use probstat_core::page::{SELECT_PROMPT, TRIALS_PROMPT, UPLOAD_PROMPT};
use crate::tui::app::{App, Focus, Overlay};
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    render_header(frame, app, chunks[0], theme);
    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(app.selector_width), Constraint::Min(0)])
        .split(chunks[1]);
    render_controls(frame, app, mid[0], theme);
    render_main(frame, app, mid[1], theme);
    render_bottombar(frame, app, chunks[2], theme);
    match app.overlay {
        Overlay::Help => render_help(frame, area),
        Overlay::OpenFile => render_path_prompt(frame, app, area),
        Overlay::None => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let (title, description) = match &app.page {
        Some(p) => (p.title.as_str(), p.description.as_str()),
        None => (probstat_core::page::PAGE_TITLE, probstat_core::page::PAGE_DESCRIPTION),
    };
    let lines = vec![
        Line::from(Span::styled(format!(" {title}"), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!(" {description}")),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(theme.bg).fg(theme.fg)), area);
}

fn focus_style(focused: bool, theme: &Theme) -> Style {
    if focused { Style::default().fg(theme.highlight) } else { Style::default() }
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(3)])
        .split(area);
    let file = app
        .upload_path
        .as_ref()
        .map(|p| truncate(&p.display().to_string(), area.width.saturating_sub(4) as usize))
        .unwrap_or_else(|| "(none) press o".into());
    frame.render_widget(
        Paragraph::new(file).block(Block::default().borders(Borders::ALL).title(UPLOAD_PROMPT)),
        parts[0],
    );

    let focused = app.focus == Focus::Columns;
    let block = Block::default().borders(Borders::ALL).title(SELECT_PROMPT).border_style(focus_style(focused, theme));
    let items: Vec<ListItem> = app
        .column_options()
        .iter()
        .map(|c| ListItem::new(truncate(c, area.width.saturating_sub(4) as usize)))
        .collect();
    let mut state = ListState::default();
    if !items.is_empty() { state.select(Some(app.column_cursor.min(items.len() - 1))); }
    let list = List::new(items).block(block).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, parts[1], &mut state);

    let trials_focused = app.focus == Focus::Trials;
    let trials = Line::from(vec![
        Span::raw("- "),
        Span::styled(app.widgets.trials.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" +"),
    ]);
    frame.render_widget(
        Paragraph::new(trials)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(TRIALS_PROMPT).border_style(focus_style(trials_focused, theme))),
        parts[2],
    );
}

fn render_main(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    if let Some(fault) = &app.fault {
        let lines = vec![
            Line::from(Span::styled("This page failed to render:", Style::default().fg(theme.error).add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled(fault.clone(), Style::default().fg(theme.error))),
            Line::from(""),
            Line::from("o: open another file  x: clear upload"),
        ];
        frame.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Error")).wrap(Wrap { trim: false }), area);
        return;
    }
    let Some(page) = &app.page else {
        frame.render_widget(Paragraph::new(app.status_msg.clone()).block(Block::default().borders(Borders::ALL)), area);
        return;
    };
    match &page.dataset {
        Some(ds) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(30), Constraint::Percentage(40), Constraint::Percentage(30)])
                .split(area);
            render_table(frame, app, ds, parts[0], theme);
            render_histogram_panel(frame, ds, parts[1], theme);
            render_simulation(frame, page, parts[2], theme);
        }
        None => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(area);
            frame.render_widget(
                Paragraph::new("No file uploaded. Press o to choose a CSV file.")
                    .block(Block::default().borders(Borders::ALL).title("Data")),
                parts[0],
            );
            render_simulation(frame, page, parts[1], theme);
        }
    }
}

fn render_table(frame: &mut Frame, app: &App, ds: &DatasetSection, area: Rect, theme: &Theme) {
    let table = &ds.table;
    let max_cols = 8usize;
    let selected_idx = ds.column_options.iter().position(|c| *c == ds.selected_column);
    let vis: Vec<usize> = (0..table.column_count()).skip(app.table_scroll_x).take(max_cols).collect();
    let mut header_cells = vec![Cell::from("")];
    header_cells.extend(vis.iter().map(|&i| {
        let style = if Some(i) == selected_idx {
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Cell::from(table.column_names()[i].clone()).style(style)
    }));
    let body_height = area.height.saturating_sub(4) as usize;
    let rows: Vec<Row> = table
        .rows()
        .iter()
        .enumerate()
        .skip(app.table_scroll_y)
        .take(body_height)
        .map(|(n, row)| {
            let mut cells = vec![Cell::from(n.to_string()).style(Style::default().fg(theme.muted))];
            cells.extend(vis.iter().map(|&i| Cell::from(truncate(&row[i], 15))));
            Row::new(cells)
        })
        .collect();
    let index_width = table.row_count().max(1).to_string().len() as u16;
    let mut widths = vec![Constraint::Length(index_width)];
    widths.extend(vis.iter().map(|_| Constraint::Min(10)));
    let title = format!("{} ({} rows x {} columns)", ds.file_name, table.row_count(), table.column_count());
    let block = Block::default().borders(Borders::ALL).title(title).border_style(focus_style(app.focus == Focus::Table, theme));
    frame.render_widget(Table::new(rows, widths).header(Row::new(header_cells)).block(block), area);
}

fn render_histogram_panel(frame: &mut Frame, ds: &DatasetSection, area: Rect, theme: &Theme) {
    match &ds.histogram {
        HistogramPanel::Chart(view) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(1)])
                .split(area);
            render_figure(frame, &view.figure, parts[0], theme);
            let s = &view.summary;
            let footer = match (s.min, s.max, s.mean) {
                (Some(min), Some(max), Some(mean)) => format!(
                    " {}: {min} .. {max}  n={}  missing={}  mean={mean:.3}",
                    view.figure.x_label, s.count, s.missing
                ),
                _ => format!(" {}: no numeric values ({} missing)", view.figure.x_label, s.missing),
            };
            frame.render_widget(Paragraph::new(footer).style(Style::default().fg(theme.muted)), parts[1]);
        }
        HistogramPanel::Error { message } => {
            frame.render_widget(
                Paragraph::new(Span::styled(message.clone(), Style::default().fg(theme.error)))
                    .block(Block::default().borders(Borders::ALL).title("Histogram").border_style(Style::default().fg(theme.error)))
                    .wrap(Wrap { trim: false }),
                area,
            );
        }
    }
}

fn render_simulation(frame: &mut Frame, page: &Page, area: Rect, theme: &Theme) {
    render_figure(frame, &page.simulation.figure, area, theme);
}

/// Draws a figure as a vertical bar chart, count labels on annotated bars only.
fn render_figure(frame: &mut Frame, fig: &Figure, area: Rect, theme: &Theme) {
    let title = format!("{} ({} by {})", fig.title, fig.y_label, fig.x_label);
    let block = Block::default().borders(Borders::ALL).title(title);
    if fig.bars.is_empty() {
        frame.render_widget(Paragraph::new("No data to plot.").block(block), area);
        return;
    }
    let bars: Vec<Bar> = fig
        .bars
        .iter()
        .map(|b| {
            let annotated = fig.annotations.iter().any(|a| a.x == b.center());
            let bar = Bar::default()
                .value(b.height)
                .style(Style::default().fg(theme.bar_color(&b.color)))
                .text_value(if annotated { b.height.to_string() } else { String::new() });
            match fig.kind {
                FigureKind::Categorical => bar.label(Line::from(b.label.clone())),
                FigureKind::Histogram => bar,
            }
        })
        .collect();
    let n = bars.len() as u16;
    let gap: u16 = if fig.kind == FigureKind::Histogram { 0 } else { 2 };
    let inner = area.width.saturating_sub(2);
    let bar_width = (inner.saturating_sub(gap * n.saturating_sub(1)) / n.max(1)).clamp(1, 12);
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(gap)
        .value_style(Style::default().fg(theme.bg).bg(theme.bar).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.fg));
    frame.render_widget(chart, area);
}

fn render_path_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(60, 20, area);
    frame.render_widget(ratatui::widgets::Clear, popup);
    let content = format!("> {}_\n\nEnter: open  Esc: cancel  (.csv only)", app.path_input);
    frame.render_widget(
        Paragraph::new(content)
            .block(Block::default().borders(Borders::ALL).title(UPLOAD_PROMPT))
            .wrap(Wrap { trim: false }),
        popup,
    );
}

fn render_help(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled("Keybindings", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  q        Quit"),
        Line::from("  ?        Toggle help"),
        Line::from("  Tab      Cycle focus (columns, table, trials)"),
        Line::from("  o        Open a CSV file"),
        Line::from("  x        Clear the upload"),
        Line::from("  j/k      Select column / scroll table / change trials"),
        Line::from("  + / -    Trials +1 / -1"),
        Line::from("  PgUp/Dn  Trials +100 / -100 (trials focus)"),
        Line::from("  h/l      Scroll table columns"),
        Line::from("  r        Re-run the page"),
        Line::from("  [ / ]    Narrow / widen selector"),
    ];
    let popup = centered_rect(50, 60, area);
    frame.render_widget(ratatui::widgets::Clear, popup);
    frame.render_widget(Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help (?)")), popup);
}

fn render_bottombar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let watch = if app.watch_enabled { " [watch]" } else { "" };
    let line = Line::from(vec![
        Span::styled(format!(" {}", app.status_msg), Style::default().fg(theme.status_color(app.status_level))),
        Span::raw(format!("{watch} | q:quit ?:help Tab:focus o:open x:clear +/-:trials r:rerun")),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg).fg(theme.fg)), area);
}

fn centered_rect(px: u16, py: u16, r: Rect) -> Rect {
    let v = Layout::default().direction(Direction::Vertical).constraints([Constraint::Percentage((100-py)/2), Constraint::Percentage(py), Constraint::Percentage((100-py)/2)]).split(r);
    Layout::default().direction(Direction::Horizontal).constraints([Constraint::Percentage((100-px)/2), Constraint::Percentage(px), Constraint::Percentage((100-px)/2)]).split(v[1])[1]
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max { s.to_owned() } else { format!("{}\u{2026}", s.chars().take(max.saturating_sub(1)).collect::<String>()) }
}
