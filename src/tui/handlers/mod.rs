use crossterm::event::{KeyCode, KeyModifiers};

use crate::tui::app::{App, Pane};

/// Handle input and return true if the app should quit
pub fn handle_input(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> bool {
    // Global keys: Esc quits, Tab cycles panes, F2 is the caps-lock stand-in
    match key {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::BackTab => {
            app.cycle_pane();
            return false;
        }
        KeyCode::F(2) => {
            app.toggle_caps();
            return false;
        }
        _ => {}
    }

    match app.focused_pane {
        Pane::Input => handle_typing_input(app, key, modifiers),
        Pane::Output => handle_output_input(app, key),
    }

    false
}

fn handle_typing_input(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
    match key {
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.newline(),
        KeyCode::Delete => app.clear(),
        KeyCode::Char(_) => app.type_key(key, modifiers),
        _ => {}
    }
}

fn handle_output_input(app: &mut App, key: KeyCode) {
    // Event log scrolling
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.log_scroll = app.log_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.log_scroll = app.log_scroll.saturating_add(1);
        }
        _ => {}
    }
}
