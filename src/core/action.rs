//! Executed-move records.
//!
//! Every move the engine applies is recorded as a `MoveRecord`: who moved,
//! from where to where, and which square was blocked afterwards.

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::position::Position;

/// One executed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who moved.
    pub player: Player,
    /// Origin of the token.
    pub from: Position,
    /// Destination of the token.
    pub to: Position,
    /// Square blocked after the move. `None` only if no empty square was left.
    pub blocked: Option<Position>,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.player, self.from, self.to)?;
        if let Some(blocked) = self.blocked {
            write!(f, ", blocked {blocked}")?;
        }
        Ok(())
    }
}
