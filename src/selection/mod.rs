//! Move selection: turning position picks into a validated move.

pub mod phase;
pub mod selector;

pub use phase::{ListenerId, Phase, PhaseListeners};
pub use selector::MoveSelector;
