//! Winner reporting and the persistent score store.

mod scoreboard;

pub use scoreboard::{ResultSink, ScoreBoard, DEFAULT_SCORES_FILE};
