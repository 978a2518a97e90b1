//! Rules engine trait.
//!
//! `MoveSelector` is written against this trait rather than a concrete
//! engine, so a variant with several tokens per player only has to answer
//! these questions differently.

use smallvec::SmallVec;

use crate::core::{MoveRecord, Player, Position, KING_DIRECTIONS};

/// Result of a finished game.
///
/// There are no draws: the player to move with no legal destination loses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameResult {
    /// The player who made the last successful move.
    pub winner: Player,
    /// The player to move who has no legal destination.
    pub stuck: Player,
}

impl GameResult {
    /// Result for a game where `stuck` cannot move.
    #[must_use]
    pub const fn stuck(stuck: Player) -> Self {
        Self {
            winner: stuck.opponent(),
            stuck,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        self.winner == player
    }
}

/// Whether the player to move still has a legal move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The player to move has at least one legal move.
    InProgress,
    /// The player to move has none. Terminal.
    Over,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `make_move` returns `None` for an illegal destination and changes nothing
/// - `is_terminal` returns `None` while the game continues
pub trait RulesEngine {
    /// The player whose turn it is.
    fn current_player(&self) -> Player;

    /// Cell holding the current player's token, if any.
    fn find_current_player_position(&self) -> Option<Position>;

    /// True iff the current player's token can be picked as a move origin.
    fn is_legal_to_move_from(&self) -> bool;

    /// True iff the current player may move their token to `to`.
    fn is_legal_move(&self, to: Position) -> bool;

    /// Execute a move to `to`. Illegal moves are rejected silently.
    fn make_move(&mut self, to: Position) -> Option<MoveRecord>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    /// All legal destinations for the current player.
    ///
    /// Default implementation tests the eight neighbors of the token.
    fn legal_moves(&self) -> SmallVec<[Position; 8]> {
        let Some(from) = self.find_current_player_position() else {
            return SmallVec::new();
        };

        KING_DIRECTIONS
            .iter()
            .map(|&(d_row, d_col)| from.offset(d_row, d_col))
            .filter(|&to| self.is_legal_move(to))
            .collect()
    }
}
