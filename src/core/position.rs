//! Board coordinates.
//!
//! A `Position` is a signed `(row, col)` pair. Coordinates are signed so that
//! neighbor arithmetic near the edge produces an off-board position instead
//! of wrapping; bounds are checked against a `Board` or `GameConfig`.
//!
//! ```
//! use rust_isolation::core::Position;
//!
//! let p = Position::new(2, 0);
//! assert_eq!(p.offset(-1, 1), Position::new(1, 1));
//! assert_eq!(p.to_string(), "(2,0)");
//! ```

use serde::{Deserialize, Serialize};

/// The eight king-move direction vectors `(d_row, d_col)`.
///
/// Every `(d_row, d_col)` in `{-1, 0, 1}²` except `(0, 0)`.
pub const KING_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: i32,
    /// Column index, 0 at the left.
    pub col: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position shifted by `(d_row, d_col)`.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Absolute `(d_row, d_col)` between two positions.
    ///
    /// Never overflows, whatever the coordinates.
    #[must_use]
    pub const fn abs_delta(self, other: Position) -> (u32, u32) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }

    /// True iff `other` is one of the eight neighbors of `self`.
    ///
    /// `d_row + d_col == 1` covers orthogonal steps, `d_row == d_col == 1`
    /// covers diagonals. The zero vector is excluded.
    #[must_use]
    pub fn is_king_step_to(self, other: Position) -> bool {
        matches!(self.abs_delta(other), (0, 1) | (1, 0) | (1, 1))
    }

    /// Iterate over the eight neighbors, on-board or not.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        KING_DIRECTIONS
            .iter()
            .map(move |&(d_row, d_col)| self.offset(d_row, d_col))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}
