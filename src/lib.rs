//! Terminal snake: a single-threaded engine that moves a snake on a bordered
//! grid and repaints the whole frame on every tick.

pub mod clock;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod settings;
pub mod snake;
pub mod surface;
pub mod term;

pub type TermInt = u16;

pub use error::{Error, GameOver, Result};
pub use game::{Game, GameState};
pub use settings::Settings;
