//! Core types: positions, squares, players, board, configuration, RNG.
//!
//! These are the building blocks the engine and selector share. Nothing in
//! here enforces game rules.

pub mod position;
pub mod square;
pub mod player;
pub mod board;
pub mod rng;
pub mod config;
pub mod action;

pub use position::{Position, KING_DIRECTIONS};
pub use square::Square;
pub use player::{Player, PlayerMap};
pub use board::Board;
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, DEFAULT_COLS, DEFAULT_ROWS};
pub use action::MoveRecord;
