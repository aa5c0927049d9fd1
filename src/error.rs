//! Error types surfaced by session setup and the menu shell.

use thiserror::Error;

use crate::grid::Pos;

/// Failures while building a fresh session. Fatal for that session only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// Sizes must be odd and at least 3 so the carve lattice lines up.
    #[error("maze size {width}x{height} must be odd and at least 3x3")]
    InvalidDimensions { width: usize, height: usize },

    /// Start must sit on an odd interior cell.
    #[error("start ({}, {}) is not an odd interior cell", .0.x, .0.y)]
    InvalidStart(Pos),

    /// Rejection sampling ran out of attempts.
    #[error("could not place {what} after {attempts} attempts")]
    PlacementExhausted { what: &'static str, attempts: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("invalid selection {input:?}, expected a number between 1 and {max}")]
    InvalidSelection { input: char, max: u8 },
}
