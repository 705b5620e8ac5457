//! Keyboard handling: terminal key events to logical game keys.

use crate::game::Variant;
use crate::session::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical key that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Space,
    Enter,
    Up,
    /// Letters are matched case-insensitively.
    Char(char),
}

impl Key {
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(' ') => Some(Key::Space),
            KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Up => Some(Key::Up),
            _ => None,
        }
    }

    fn normalized(self) -> Self {
        match self {
            Key::Char(' ') => Key::Space,
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Space => write!(f, "Space"),
            Key::Enter => write!(f, "Enter"),
            Key::Up => write!(f, "Up"),
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
        }
    }
}

/// The two actions the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Flap,
    Start,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub flap: Key,
    pub start: Key,
}

impl KeyBindings {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                flap: Key::Space,
                start: Key::Enter,
            },
            Variant::Compact => Self {
                flap: Key::Up,
                start: Key::Char('s'),
            },
            Variant::Arcade => Self {
                flap: Key::Space,
                start: Key::Char('n'),
            },
        }
    }

    /// Replace individual bindings.
    pub fn with_overrides(self, flap: Option<Key>, start: Option<Key>) -> Self {
        Self {
            flap: flap.map(Key::normalized).unwrap_or(self.flap),
            start: start.map(Key::normalized).unwrap_or(self.start),
        }
    }

    pub fn resolve(&self, key: Key) -> GameKey {
        let key = key.normalized();
        if key == self.flap {
            GameKey::Flap
        } else if key == self.start {
            GameKey::Start
        } else {
            GameKey::Other
        }
    }

    /// `(key, action)` pairs for the status bar.
    pub fn controls(&self) -> [(String, &'static str); 3] {
        [
            (format!("[{}]", self.flap), "Flap"),
            (format!("[{}]", self.start), "Start"),
            ("[Esc]".to_string(), "Quit"),
        ]
    }
}

/// Translate a terminal key event. Releases and repeats are dropped; Esc,
/// Ctrl-C and an unbound `q` quit.
pub fn map_key_event(event: &KeyEvent, bindings: &KeyBindings) -> Option<Command> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    if event.code == KeyCode::Esc {
        return Some(Command::Quit);
    }

    let key = Key::from_code(event.code);
    match key {
        Some(key) => match bindings.resolve(key) {
            GameKey::Other if key == Key::Char('q') => Some(Command::Quit),
            action => Some(Command::Key(action)),
        },
        None => Some(Command::Key(GameKey::Other)),
    }
}
