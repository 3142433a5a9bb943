//! The remote-control command vocabulary.
//!
//! Hosts translate raw input (TUI key presses, a physical-remote bridge)
//! into these values before calling [`crate::transition`]. The serde shape
//! is internally tagged so bridges can feed commands as JSON lines.

use serde::{Deserialize, Serialize};

/// One unit of remote-control input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum Command {
    Power,
    Exit,
    Ok,
    Up,
    Down,
    Left,
    Right,
    /// `digit-1`..`digit-5` — arm a bulk panel operation in channel-list mode.
    Digit { n: u8 },
    /// Progress delta from the external channel-scan producer. Only
    /// meaningful while the search-progress screen is open.
    SearchProgress {
        progress: f32,
        tv_list: Vec<String>,
        radio_list: Vec<String>,
    },
    /// Cross-mode jump directive, issued by whoever owns the scan-complete
    /// acknowledgment. Two of these in sequence reproduce the
    /// install → antenna-setup landing.
    Custom { action: CustomAction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomAction {
    OpenInstall,
    OpenAntennaSetup,
}

/// The physical button set, for hosts that want to keymap against a closed
/// enum before building a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Power,
    Exit,
    Ok,
    Up,
    Down,
    Left,
    Right,
    Digit(u8),
}

impl From<Button> for Command {
    fn from(button: Button) -> Self {
        match button {
            Button::Power => Command::Power,
            Button::Exit => Command::Exit,
            Button::Ok => Command::Ok,
            Button::Up => Command::Up,
            Button::Down => Command::Down,
            Button::Left => Command::Left,
            Button::Right => Command::Right,
            Button::Digit(n) => Command::Digit { n },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_wire_shape() {
        let json = serde_json::to_string(&Command::Custom {
            action: CustomAction::OpenAntennaSetup,
        })
        .unwrap();
        assert_eq!(json, r#"{"cmd":"custom","action":"open-antenna-setup"}"#);

        let cmd: Command = serde_json::from_str(r#"{"cmd":"digit","n":3}"#).unwrap();
        assert_eq!(cmd, Command::Digit { n: 3 });
    }
}
