//! Game configuration.
//!
//! The reference board is 6 rows by 8 columns. `TokenA` always starts at
//! row 2 of the first column and `TokenB` at row 3 of the last column, so a
//! board needs at least 4 rows and 2 columns.

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::position::Position;
use crate::error::GameError;

/// Number of rows on the reference board.
pub const DEFAULT_ROWS: usize = 6;

/// Number of columns on the reference board.
pub const DEFAULT_COLS: usize = 8;

/// Smallest row count that fits both start cells.
pub const MIN_ROWS: usize = 4;

/// Smallest column count that keeps the start cells apart.
pub const MIN_COLS: usize = 2;

/// Board dimensions and RNG seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of rows.
    pub rows: usize,

    /// Number of columns.
    pub cols: usize,

    /// Seed for square blocking. Same seed, same blocked squares.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the board size.
    #[must_use]
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the board is large enough for the fixed start cells.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.rows < MIN_ROWS || self.cols < MIN_COLS {
            return Err(GameError::InvalidConfig(format!(
                "board must be at least {MIN_ROWS}x{MIN_COLS}, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.rows > i32::MAX as usize || self.cols > i32::MAX as usize {
            return Err(GameError::InvalidConfig(format!(
                "board {}x{} does not fit signed coordinates",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Where a player's token starts.
    #[must_use]
    pub fn start_position(&self, player: Player) -> Position {
        match player {
            Player::Player1 => Position::new(2, 0),
            Player::Player2 => Position::new(3, self.cols as i32 - 1),
        }
    }
}
