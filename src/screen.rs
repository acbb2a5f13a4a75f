//! Top-level screen state machine
//!
//! ```text
//! Title --Confirm--> Play --Cancel--> Credits --Confirm|Cancel--> Title
//! ```
//!
//! Transitions only happen on discrete input events. Anything not in the table
//! leaves the screen unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Title,
    Play,
    Credits,
}

/// Menu-level input events, produced on the press edge of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Confirm,
    Cancel,
}

impl Screen {
    /// Transition table. `None` means the event is ignored on this screen.
    pub fn next(self, event: ScreenEvent) -> Option<Screen> {
        use Screen::*;
        use ScreenEvent::*;
        match (self, event) {
            (Title, Confirm) => Some(Play),
            (Play, Cancel) => Some(Credits),
            (Credits, Confirm) | (Credits, Cancel) => Some(Title),
            (Title, Cancel) | (Play, Confirm) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Title => "title",
            Screen::Play => "play",
            Screen::Credits => "credits",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut screen = Screen::default();
        assert_eq!(screen, Screen::Title);
        for (event, want) in [
            (ScreenEvent::Confirm, Screen::Play),
            (ScreenEvent::Cancel, Screen::Credits),
            (ScreenEvent::Confirm, Screen::Title),
        ] {
            screen = screen.next(event).unwrap();
            assert_eq!(screen, want);
        }
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(Screen::Title.next(ScreenEvent::Cancel), None);
        // Confirm is the fire button during play
        assert_eq!(Screen::Play.next(ScreenEvent::Confirm), None);
        assert_eq!(Screen::Credits.next(ScreenEvent::Cancel), Some(Screen::Title));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Screen::Credits).unwrap();
        assert_eq!(json, "\"credits\"");
        let screen: Screen = serde_json::from_str("\"play\"").unwrap();
        assert_eq!(screen, Screen::Play);
    }
}
