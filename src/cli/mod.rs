//! Host-side simulator support: gesture scripts and the terminal front end.
#![allow(missing_docs)]

pub mod simulator;

use std::fmt;

use crate::display::Display;
use crate::menu::engine::MenuEngine;

/// One button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Down,
    Up,
    Enter,
}

impl Gesture {
    /// Dispatch this gesture to `engine`.
    pub fn apply<D: Display>(self, engine: &mut MenuEngine<D>) {
        match self {
            Self::Down => engine.down(),
            Self::Up => engine.up(),
            Self::Enter => engine.enter(),
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "down"),
            Self::Up => write!(f, "up"),
            Self::Enter => write!(f, "enter"),
        }
    }
}

/// A script character that is not a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub position: usize,
    pub found: char,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected {:?} at position {} in gesture script (use d, u, e)",
            self.found, self.position
        )
    }
}

impl std::error::Error for ScriptError {}

/// Parse `d`/`u`/`e` gestures; whitespace and commas are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Gesture>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace() && *c != ',')
        .map(|(position, found)| match found.to_ascii_lowercase() {
            'd' => Ok(Gesture::Down),
            'u' => Ok(Gesture::Up),
            'e' => Ok(Gesture::Enter),
            _ => Err(ScriptError { position, found }),
        })
        .collect()
}
