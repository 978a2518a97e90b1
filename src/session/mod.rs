//! A game session: the single owner of engine, selector, player names and
//! the result sink.
//!
//! A front end forwards every position pick to `GameSession::select` and
//! redraws from `engine()` afterwards. When a pick completes a move that
//! ends the game, the winner's display name is reported to the sink once.

use tracing::{info, warn};

use crate::core::{MoveRecord, Player, PlayerMap, Position};
use crate::engine::BoardEngine;
use crate::error::{GameError, StoreError};
use crate::rules::GameResult;
use crate::scores::ResultSink;
use crate::selection::{ListenerId, MoveSelector, Phase};

/// What a single pick did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The pick was rejected; the same player picks again.
    Rejected,
    /// The pick was accepted but no move was made yet.
    Selected(Phase),
    /// A move was executed and the game continues.
    Moved(MoveRecord),
    /// A move was executed and ended the game.
    GameOver {
        record: MoveRecord,
        result: GameResult,
        winner_name: String,
    },
}

/// Errors surfaced by a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to record result: {0}")]
    Store(#[from] StoreError),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Owns one game and everything driving it.
pub struct GameSession<S: ResultSink> {
    engine: BoardEngine,
    selector: MoveSelector,
    names: PlayerMap<String>,
    sink: S,
    reported: bool,
}

impl<S: ResultSink> GameSession<S> {
    /// Start a session on `engine` with the given display names.
    ///
    /// An engine whose game has already ended (for example one restored
    /// from a snapshot) is taken as already reported: its winner is not sent
    /// to the sink again, `result()` exposes it and every pick is rejected
    /// until `restart`.
    pub fn new(engine: BoardEngine, names: PlayerMap<String>, sink: S) -> Self {
        let selector = MoveSelector::new(&engine);
        let finished = engine.result();
        info!(
            player1 = %names[Player::Player1],
            player2 = %names[Player::Player2],
            finished = finished.is_some(),
            "Starting game session"
        );
        Self {
            engine,
            selector,
            names,
            sink,
            reported: finished.is_some(),
        }
    }

    /// The engine, for rendering.
    #[must_use]
    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    /// The selector, for highlighting.
    #[must_use]
    pub fn selector(&self) -> &MoveSelector {
        &self.selector
    }

    /// The result sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Display name of `player`.
    #[must_use]
    pub fn name(&self, player: Player) -> &str {
        &self.names[player]
    }

    /// Display name of the player to move.
    #[must_use]
    pub fn current_name(&self) -> &str {
        self.name(self.engine.current_player())
    }

    /// Register a phase-change callback on the selector.
    pub fn subscribe(&mut self, listener: impl FnMut(Phase, Phase) + 'static) -> ListenerId {
        self.selector.subscribe(listener)
    }

    /// Feed one position pick.
    ///
    /// When the pick completes a legal move the move is executed at once.
    /// Picks after the game has ended are rejected.
    pub fn select(&mut self, position: Position) -> Result<SelectOutcome, SessionError> {
        if self.reported {
            warn!(%position, "Ignoring selection after game over");
            return Ok(SelectOutcome::Rejected);
        }

        self.selector.select(&self.engine, position)?;
        if self.selector.is_invalid_selection() {
            return Ok(SelectOutcome::Rejected);
        }
        if !self.selector.is_ready_to_move() {
            return Ok(SelectOutcome::Selected(self.selector.phase()));
        }

        let Some(record) = self.selector.make_move(&mut self.engine)? else {
            return Ok(SelectOutcome::Rejected);
        };

        match self.engine.result() {
            Some(result) => {
                let winner_name = self.names[result.winner].clone();
                info!(winner = %result.winner, name = %winner_name, "Winner determined");
                self.reported = true;
                self.sink.record_win(&winner_name)?;
                Ok(SelectOutcome::GameOver {
                    record,
                    result,
                    winner_name,
                })
            }
            None => Ok(SelectOutcome::Moved(record)),
        }
    }

    /// Winner once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.engine.result()
    }

    /// Start a new game with the same players.
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.engine.reset();
        self.selector.reset(&self.engine);
        self.reported = false;
    }
}
