//! # rust-isolation
//!
//! Engine for a two-player blocking game on a fixed grid.
//!
//! Each player has a single token that moves one step in any of eight
//! directions onto an empty square. After every move one random empty square
//! becomes permanently blocked. The player to move with no legal destination
//! loses.
//!
//! ## Design Principles
//!
//! 1. **Explicit ownership**: one `BoardEngine` per game, owned by a
//!    `GameSession`. No globals.
//!
//! 2. **Silent rejection**: illegal moves are not errors. The engine ignores
//!    them and the selector flags them, so a UI loop just asks again.
//!
//! 3. **Deterministic**: blocking uses a seeded ChaCha8 stream, so a seed and
//!    a move list reproduce a game exactly.
//!
//! ## Modules
//!
//! - `core`: Positions, squares, players, board, configuration, RNG
//! - `rules`: `RulesEngine` trait the selector is written against
//! - `engine`: `BoardEngine` and snapshots
//! - `selection`: Two-phase move selection state machine
//! - `scores`: Win-count store and result sink
//! - `session`: Owner of one game and its players
//! - `console`: Text front end
//!
//! ## Example
//!
//! ```
//! use rust_isolation::{BoardEngine, MoveSelector, Phase, Position, Square};
//!
//! let mut engine = BoardEngine::default();
//! let mut selector = MoveSelector::new(&engine);
//! assert_eq!(selector.phase(), Phase::SelectTo);
//!
//! selector.select(&engine, Position::new(1, 1)).unwrap();
//! assert!(selector.is_ready_to_move());
//!
//! selector.make_move(&mut engine).unwrap();
//! assert_eq!(engine.get_square(Position::new(1, 1)), Ok(Square::TokenA));
//! assert_eq!(engine.board().count(Square::Blocked), 1);
//! ```

pub mod core;
pub mod error;
pub mod rules;
pub mod engine;
pub mod selection;
pub mod scores;
pub mod session;
pub mod console;

// Re-export commonly used types
pub use crate::core::{
    Board, GameConfig, GameRng, GameRngState, MoveRecord, Player, PlayerMap, Position, Square,
};

pub use crate::error::{GameError, ParseError, StoreError};

pub use crate::rules::{GameResult, GameStatus, RulesEngine};

pub use crate::engine::{BoardEngine, GameSnapshot};

pub use crate::selection::{ListenerId, MoveSelector, Phase, PhaseListeners};

pub use crate::scores::{ResultSink, ScoreBoard};

pub use crate::session::{GameSession, SelectOutcome, SessionError};

pub use crate::console::{parse_move, ConsoleGame};
