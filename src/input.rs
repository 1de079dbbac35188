use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Handle a single key input event.
///
/// Raw mode swallows SIGINT, so Ctrl+C arrives here as a key and is treated
/// as the interrupt.
pub fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // ── Quit ──
        KeyCode::F(10) | KeyCode::Esc | KeyCode::Char('q') => app.stop(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.stop(),

        // ── Refresh now ──
        KeyCode::F(5) | KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => app.request_refresh(),

        // ── Scrolling ──
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(app.page_rows()),
        KeyCode::PageDown => app.scroll_down(app.page_rows()),
        KeyCode::Home => app.scroll_home(),
        KeyCode::End => app.scroll_end(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RefreshState;
    use crate::config::MonitorConfig;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_input(app, KeyEvent::new(code, modifiers));
    }

    #[test]
    fn interrupt_keys_stop_the_loop() {
        for (code, modifiers) in [
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::F(10), KeyModifiers::NONE),
        ] {
            let mut app = App::new(&MonitorConfig::default());
            press(&mut app, code, modifiers);
            assert_eq!(app.state, RefreshState::Stopped, "{code:?}");
        }
    }

    #[test]
    fn plain_c_does_not_quit() {
        let mut app = App::new(&MonitorConfig::default());
        press(&mut app, KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(app.state, RefreshState::Running);
    }

    #[test]
    fn r_requests_refresh() {
        let mut app = App::new(&MonitorConfig::default());
        press(&mut app, KeyCode::Char('r'), KeyModifiers::NONE);
        assert!(app.refresh_requested);
        assert!(app.is_running());
    }
}
