use crate::tui::app::{App, Focus, Overlay, StatusLevel};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

const PAGE_STEP: u32 = 100;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if app.overlay == Overlay::OpenFile {
        handle_path_prompt(app, key);
        return;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = if app.overlay == Overlay::Help { Overlay::None } else { Overlay::Help };
            return;
        }
        KeyCode::Esc if app.overlay == Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        KeyCode::Tab => {
            app.cycle_focus();
            return;
        }
        KeyCode::Char('o') => {
            app.overlay = Overlay::OpenFile;
            app.path_input.clear();
            return;
        }
        KeyCode::Char('x') => {
            app.clear_upload();
            return;
        }
        KeyCode::Char('r') => {
            app.rerender();
            app.set_status(StatusLevel::Info, "Re-ran page");
            return;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.set_trials(app.widgets.trials.increment(1));
            return;
        }
        KeyCode::Char('-') => {
            app.set_trials(app.widgets.trials.decrement(1));
            return;
        }
        KeyCode::PageUp if app.focus == Focus::Trials => {
            app.set_trials(app.widgets.trials.increment(PAGE_STEP));
            return;
        }
        KeyCode::PageDown if app.focus == Focus::Trials => {
            app.set_trials(app.widgets.trials.decrement(PAGE_STEP));
            return;
        }
        _ => {}
    }
    match app.focus {
        Focus::Columns => handle_columns(app, key),
        Focus::Table => handle_table(app, key),
        Focus::Trials => handle_trials(app, key),
    }
}

fn handle_columns(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.column_down(),
        KeyCode::Char('k') | KeyCode::Up => app.column_up(),
        KeyCode::Char('[') => {
            app.selector_width = app.selector_width.saturating_sub(1).max(15);
        }
        KeyCode::Char(']') => {
            app.selector_width = (app.selector_width + 1).min(60);
        }
        _ => {}
    }
}

fn handle_table(app: &mut App, key: KeyEvent) {
    let (rows, cols) = app
        .page
        .as_ref()
        .and_then(|p| p.dataset.as_ref())
        .map(|d| (d.table.row_count(), d.table.column_count()))
        .unwrap_or((0, 0));
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.table_scroll_x = app.table_scroll_x.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.table_scroll_x + 1 < cols {
                app.table_scroll_x += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.table_scroll_y = app.table_scroll_y.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.table_scroll_y + 1 < rows {
                app.table_scroll_y += 1;
            }
        }
        KeyCode::PageDown => {
            app.table_scroll_y = (app.table_scroll_y + 20).min(rows.saturating_sub(1));
        }
        KeyCode::PageUp => {
            app.table_scroll_y = app.table_scroll_y.saturating_sub(20);
        }
        KeyCode::Home => {
            app.table_scroll_x = 0;
            app.table_scroll_y = 0;
        }
        _ => {}
    }
}

fn handle_trials(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.set_trials(app.widgets.trials.increment(1)),
        KeyCode::Down | KeyCode::Char('j') => app.set_trials(app.widgets.trials.decrement(1)),
        _ => {}
    }
}

fn handle_path_prompt(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Enter => {
            let input = app.path_input.trim().to_string();
            app.overlay = Overlay::None;
            if input.is_empty() {
                return;
            }
            let path = PathBuf::from(input);
            if let Err(e) = app.open_upload(&path) {
                tracing::warn!(path = %path.display(), error = %e, "upload rejected");
                app.set_status(StatusLevel::Error, format!("open error: {e}"));
            }
        }
        KeyCode::Char(c) => {
            app.path_input.push(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probstat_common::Config;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        let mut app = App::new(Config::default(), Some(7));
        app.rerender();
        app
    }

    #[test]
    fn plus_minus_adjust_trials_within_bounds() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.widgets.trials.get(), 1001);
        app.set_trials(probstat_core::TrialCount::new(1).unwrap());
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.widgets.trials.get(), 1);
    }

    #[test]
    fn page_keys_step_trials_when_focused() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Trials);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.widgets.trials.get(), 1100);
        for _ in 0..200 {
            press(&mut app, KeyCode::PageUp);
        }
        assert_eq!(app.widgets.trials.get(), 10_000);
    }

    #[test]
    fn path_prompt_collects_input_and_escapes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.overlay, Overlay::OpenFile);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.path_input, "q");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn missing_path_reports_status() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'));
        for c in "/nope/missing.csv".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.status_msg.starts_with("open error"));
        assert!(app.widgets.upload.is_none());
    }

    #[test]
    fn help_toggles_and_q_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
