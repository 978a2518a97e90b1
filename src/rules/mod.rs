//! Rules engine trait for the move selector.
//!
//! `BoardEngine` implements `RulesEngine` to answer:
//! - Where the current player's token is
//! - Which destinations are legal
//! - How a move modifies the board
//! - Whether the game is over and who won

pub mod engine;

pub use engine::{GameResult, GameStatus, RulesEngine};
