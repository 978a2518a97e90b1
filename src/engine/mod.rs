//! The board engine.
//!
//! `BoardEngine` owns the board and the turn. It depends on nothing but the
//! core types; the selector and session are built on top of it.

mod board_engine;
mod snapshot;

pub use board_engine::BoardEngine;
pub use snapshot::GameSnapshot;
