//! Fixed-size grid of squares.
//!
//! Cells are stored row-major in a single `Vec`. `Board` knows nothing about
//! turns or legality; it only answers "what is at this cell" and places
//! squares. Rules live in `BoardEngine`.

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::square::Square;

/// A `rows × cols` grid, each cell holding exactly one `Square`.
///
/// Deserialization rejects a cell list whose length is not `rows * cols`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Square>,
}

#[derive(Deserialize)]
struct RawBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Square>,
}

impl TryFrom<RawBoard> for Board {
    type Error = String;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let expected = raw
            .rows
            .checked_mul(raw.cols)
            .ok_or_else(|| format!("board {}x{} is too large", raw.rows, raw.cols))?;
        if raw.cells.len() != expected {
            return Err(format!(
                "board {}x{} needs {expected} cells, found {}",
                raw.rows,
                raw.cols,
                raw.cells.len()
            ));
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

impl Board {
    /// Create an all-empty board.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Square::Empty; rows * cols],
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bounds check.
    #[must_use]
    pub fn is_on_board(&self, row: i32, col: i32) -> bool {
        0 <= row && (row as usize) < self.rows && 0 <= col && (col as usize) < self.cols
    }

    /// Bounds check on a position.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.is_on_board(position.row, position.col)
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row as usize * self.cols + position.col as usize)
    }

    /// The square at `position`, or `None` off-board.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Square> {
        self.index(position).map(|i| self.cells[i])
    }

    /// Place `square` at `position`.
    ///
    /// Returns the previous square, or `None` (and changes nothing) off-board.
    pub fn set(&mut self, position: Position, square: Square) -> Option<Square> {
        let i = self.index(position)?;
        Some(std::mem::replace(&mut self.cells[i], square))
    }

    /// Set every cell to `Empty`.
    pub fn clear(&mut self) {
        self.cells.fill(Square::Empty);
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Square)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(i, &square)| {
            (Position::new((i / cols) as i32, (i % cols) as i32), square)
        })
    }

    /// First cell (row-major) holding `square`.
    #[must_use]
    pub fn find(&self, square: Square) -> Option<Position> {
        self.iter().find(|&(_, s)| s == square).map(|(p, _)| p)
    }

    /// Number of cells holding `square`.
    #[must_use]
    pub fn count(&self, square: Square) -> usize {
        self.cells.iter().filter(|&&s| s == square).count()
    }
}

/// One line per row, each cell as its ordinal followed by a space.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for square in row {
                write!(f, "{} ", square.ordinal())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
