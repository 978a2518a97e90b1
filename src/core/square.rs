//! Cell contents.

use serde::{Deserialize, Serialize};

/// What a single board cell holds.
///
/// The discriminants are the cell ordinals used by the text rendering
/// (`Empty` = 0 ... `Blocked` = 3).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Square {
    /// Free cell a token may move onto.
    #[default]
    Empty = 0,
    /// Token of the first player.
    TokenA = 1,
    /// Token of the second player.
    TokenB = 2,
    /// Permanently blocked cell.
    Blocked = 3,
}

impl Square {
    /// Ordinal used by the text rendering.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// True for `TokenA` and `TokenB`.
    #[must_use]
    pub const fn is_token(self) -> bool {
        matches!(self, Square::TokenA | Square::TokenB)
    }
}
