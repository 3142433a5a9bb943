//! Keyboard → virtual-remote translation.
//!
//! The host owns this mapping; the control model only ever sees the remote
//! vocabulary. Keys that are not on the remote (quit) stay host-side.

use obx_core::command::Button;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward a remote button to the command processor.
    Remote(Button),
    /// Leave the simulator (not a remote button).
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyAction::Quit);
    }
    let action = match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('p') => KeyAction::Remote(Button::Power),
        KeyCode::Esc | KeyCode::Backspace => KeyAction::Remote(Button::Exit),
        KeyCode::Enter => KeyAction::Remote(Button::Ok),
        KeyCode::Up => KeyAction::Remote(Button::Up),
        KeyCode::Down => KeyAction::Remote(Button::Down),
        KeyCode::Left => KeyAction::Remote(Button::Left),
        KeyCode::Right => KeyAction::Remote(Button::Right),
        KeyCode::Char(c @ '1'..='5') => {
            KeyAction::Remote(Button::Digit(c as u8 - b'0'))
        }
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: ratatui::crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn remote_bindings() {
        assert_eq!(
            map_key(key(KeyCode::Enter)),
            Some(KeyAction::Remote(Button::Ok))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('3'))),
            Some(KeyAction::Remote(Button::Digit(3)))
        );
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
    }
}
