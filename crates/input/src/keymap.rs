use burnout_common::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors from parsing input configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("invalid key code: {0:?}")]
    InvalidKeyCode(String),
}

/// A raw key code as delivered by the host (DOM-style numeric codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ARROW_LEFT: KeyCode = KeyCode(37);
    pub const ARROW_UP: KeyCode = KeyCode(38);
    pub const ARROW_RIGHT: KeyCode = KeyCode(39);
    pub const ARROW_DOWN: KeyCode = KeyCode(40);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const S: KeyCode = KeyCode(83);
    pub const W: KeyCode = KeyCode(87);
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts a number or one of the arrow / WASD key names.
impl FromStr for KeyCode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u32>() {
            return Ok(KeyCode(code));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "arrowleft" | "left" => Ok(KeyCode::ARROW_LEFT),
            "arrowup" | "up" => Ok(KeyCode::ARROW_UP),
            "arrowright" | "right" => Ok(KeyCode::ARROW_RIGHT),
            "arrowdown" | "down" => Ok(KeyCode::ARROW_DOWN),
            "a" => Ok(KeyCode::A),
            "d" => Ok(KeyCode::D),
            "s" => Ok(KeyCode::S),
            "w" => Ok(KeyCode::W),
            _ => Err(InputError::InvalidKeyCode(s.to_string())),
        }
    }
}

/// A key-down event. Only the key code matters to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self { code }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Direction → key code bindings, fixed at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl KeyMap {
    /// Arrow keys.
    pub fn arrows() -> Self {
        Self {
            up: KeyCode::ARROW_UP,
            down: KeyCode::ARROW_DOWN,
            left: KeyCode::ARROW_LEFT,
            right: KeyCode::ARROW_RIGHT,
        }
    }

    /// W/A/S/D.
    pub fn wasd() -> Self {
        Self {
            up: KeyCode::W,
            down: KeyCode::S,
            left: KeyCode::A,
            right: KeyCode::D,
        }
    }

    pub fn code(&self, direction: Direction) -> KeyCode {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// The direction bound to `code`, tested in the order up, down, left,
    /// right. When two directions share a code the first one wins.
    pub fn direction_for(&self, code: KeyCode) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&d| self.code(d) == code)
    }

    /// Directions that can never be selected because an earlier direction
    /// has the same key code.
    pub fn shadowed(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.direction_for(self.code(d)) != Some(d))
            .collect()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::arrows()
    }
}
