//! Error types

use std::io;
use thiserror::Error;

/// Why a round ended
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOver {
    /// The new head landed on the snake's own body
    #[error("the snake ran into itself")]
    SelfCollision,

    /// The new head touched the border ring
    #[error("the snake hit the wall")]
    BoundaryCollision,

    /// No free interior cell is left for food
    #[error("the snake filled the board")]
    BoardFilled,
}

/// Process-level error type
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Compiled-in settings are unusable
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Logger could not be installed
    #[error("Failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Result type for terminal and setup operations
pub type Result<T> = std::result::Result<T, Error>;
