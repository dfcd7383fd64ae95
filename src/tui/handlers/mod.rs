use std::io;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use namepick_core::Step;

use crate::tui::app::App;

/// Handle input and return true if the app should quit
pub fn handle_input(app: &mut App, key: KeyEvent, now: Instant) -> io::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(handle_control(app, key.code));
    }

    match key.code {
        KeyCode::Esc => return Ok(app.escape()),
        KeyCode::Up => app.move_active(Step::Up),
        KeyCode::Down => app.move_active(Step::Down),
        KeyCode::Enter => app.toggle_active(),
        KeyCode::Backspace => app.backspace(now),
        KeyCode::Char(c) => app.type_char(c, now),
        _ => {}
    }

    Ok(false)
}

fn handle_control(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('c') => true,
        // Emacs-style list movement
        KeyCode::Char('p') => {
            app.move_active(Step::Up);
            false
        }
        KeyCode::Char('n') => {
            app.move_active(Step::Down);
            false
        }
        _ => false,
    }
}
