use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus};

/// Dispatch a key press. While the search box is focused keystrokes edit
/// the query; otherwise they drive the tab coordinator and the price
/// controls.
pub fn handle_key_events(key_event: KeyEvent, app: &mut App, now: Instant) {
    match app.focus {
        Focus::Search => handle_search_key(key_event, app, now),
        Focus::Dashboard => handle_dashboard_key(key_event, app, now),
    }
}

fn handle_search_key(key_event: KeyEvent, app: &mut App, now: Instant) {
    match key_event.code {
        KeyCode::Esc => {
            app.search.escape();
            app.focus = Focus::Dashboard;
        }
        KeyCode::Enter => app.search_enter(now),
        KeyCode::Down => app.search.key_down(),
        KeyCode::Up => app.search.key_up(),
        KeyCode::Backspace => app.search.backspace(now),
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search.push_char(c, now);
        }
        _ => {}
    }
}

fn handle_dashboard_key(key_event: KeyEvent, app: &mut App, now: Instant) {
    match key_event.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('/') => app.focus = Focus::Search,

        // Tab navigation
        KeyCode::Right | KeyCode::Tab => {
            app.coordinator.next(now);
            app.clamp_cursor();
        }
        KeyCode::Left | KeyCode::BackTab => {
            app.coordinator.prev(now);
            app.clamp_cursor();
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            app.coordinator.go_to(index, now);
            app.clamp_cursor();
        }

        // Price controls, live only while the controls bar shows.
        KeyCode::Char(']') if app.coordinator.controls_bar_visible() => {
            app.set_range(app.range.next());
        }
        KeyCode::Char('[') if app.coordinator.controls_bar_visible() => {
            app.set_range(app.range.prev());
        }
        KeyCode::Char('l' | 'L') if app.coordinator.controls_bar_visible() => {
            app.toggle_log_scale();
        }

        // Tooltip cursor
        KeyCode::Char(',') => app.move_cursor(-1),
        KeyCode::Char('.') => app.move_cursor(1),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::data::DataDir;
    use chart_model::AxisScale;
    use std::fs;

    fn app() -> App {
        let dir = std::env::temp_dir()
            .join(format!("dashboard-handler-test-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        App::new("AAPL", DataDir::new(dir), Instant::now())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_events(KeyEvent::from(code), app, Instant::now());
    }

    fn price_scale(app: &App) -> AxisScale {
        app.coordinator.groups()[0].charts[0].spec().left_axis.scale
    }

    #[test]
    fn log_toggle_accepts_either_case() {
        let mut app = app();
        assert_eq!(price_scale(&app), AxisScale::Linear);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(price_scale(&app), AxisScale::Logarithmic);
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(price_scale(&app), AxisScale::Linear);
    }

    #[test]
    fn quit_key_deactivates() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.active);
    }
}
