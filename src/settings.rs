//! Compiled-in game settings

use std::time::Duration;

use crate::error::{Error, Result};
use crate::TermInt;

const MIN_WIDTH: TermInt = 8;
const MAX_WIDTH: TermInt = 512;

/// What happens once a round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverPolicy {
    /// Stop the loop; the caller restores the terminal and exits
    Exit,
    /// Start a fresh round in place
    Reset,
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Playfield width in cells, border included
    pub width: TermInt,
    /// Cadence for left/right moves
    pub horizontal_period: Duration,
    /// Cadence for up/down moves
    pub vertical_period: Duration,
    pub game_over_policy: GameOverPolicy,
    /// Draw the controls legend under the playfield
    pub show_legend: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 30,
            horizontal_period: Duration::from_millis(100),
            vertical_period: Duration::from_millis(200),
            game_over_policy: GameOverPolicy::Reset,
            show_legend: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.width) {
            return Err(Error::InvalidSettings(format!(
                "width {} is outside {}..={}",
                self.width, MIN_WIDTH, MAX_WIDTH
            )));
        }

        if self.horizontal_period.is_zero() || self.vertical_period.is_zero() {
            return Err(Error::InvalidSettings("tick periods must be non-zero".to_string()));
        }

        // Cells are taller than wide, so horizontal moves must tick faster.
        if self.horizontal_period >= self.vertical_period {
            return Err(Error::InvalidSettings(format!(
                "horizontal period {:?} must be shorter than vertical period {:?}",
                self.horizontal_period, self.vertical_period
            )));
        }

        Ok(())
    }
}
