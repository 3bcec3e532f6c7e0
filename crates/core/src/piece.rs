//! Piece module - tetromino shapes and rotation math
//!
//! A [`Piece`] is four `(col, row)` offsets around a pivot at `(0, 0)`.
//! Columns grow rightward and rows grow downward, matching the grid.
//!
//! Rotation is an exact integer transform and always yields a new value, so a
//! caller can try a rotation on the grid and simply drop it if it does not fit:
//!
//! - left:  `(c, r) -> (r, -c)`
//! - right: `(c, r) -> (-r, c)`

use serde::{Deserialize, Serialize};

use crate::types::ShapeKind;

/// Offset of a single cell relative to the piece pivot, as `(col, row)`
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the pivot
pub type PieceShape = [CellOffset; 4];

/// Spawn orientation for a kind
pub fn spawn_shape(kind: ShapeKind) -> PieceShape {
    match kind {
        ShapeKind::Empty => [(0, 0); 4],
        ShapeKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        ShapeKind::I => [(-2, 0), (-1, 0), (0, 0), (1, 0)],
        ShapeKind::T => [(0, -1), (-1, 0), (0, 0), (1, 0)],
        ShapeKind::L => [(1, -1), (-1, 0), (0, 0), (1, 0)],
        ShapeKind::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        ShapeKind::S => [(1, -1), (0, -1), (0, 0), (-1, 0)],
        ShapeKind::Z => [(-1, -1), (0, -1), (0, 0), (1, 0)],
    }
}

/// An immutable piece value: a kind plus its current orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: ShapeKind,
    cells: PieceShape,
}

impl Piece {
    /// The "no piece" value: kind `Empty`, all offsets `(0, 0)`
    pub const EMPTY: Piece = Piece {
        kind: ShapeKind::Empty,
        cells: [(0, 0); 4],
    };

    /// Create a piece of `kind` in its spawn orientation
    pub fn create(kind: ShapeKind) -> Self {
        Self {
            kind,
            cells: spawn_shape(kind),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// All four offsets in table order
    pub fn offsets(&self) -> &PieceShape {
        &self.cells
    }

    /// The `i`-th `(col, row)` offset.
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    pub fn offset(&self, i: usize) -> CellOffset {
        self.cells[i]
    }

    pub fn col(&self, i: usize) -> i8 {
        self.cells[i].0
    }

    pub fn row(&self, i: usize) -> i8 {
        self.cells[i].1
    }

    /// A copy rotated 90° counter-clockwise (on a row-down board)
    pub fn rotate_left(&self) -> Self {
        self.map_cells(|(c, r)| (r, -c))
    }

    /// A copy rotated 90° clockwise (on a row-down board)
    pub fn rotate_right(&self) -> Self {
        self.map_cells(|(c, r)| (-r, c))
    }

    fn map_cells(&self, f: impl Fn(CellOffset) -> CellOffset) -> Self {
        let mut cells = self.cells;
        for cell in &mut cells {
            *cell = f(*cell);
        }
        Self {
            kind: self.kind,
            cells,
        }
    }

    pub fn min_col(&self) -> i8 {
        self.cells.iter().map(|&(c, _)| c).min().unwrap_or(0)
    }

    pub fn max_col(&self) -> i8 {
        self.cells.iter().map(|&(c, _)| c).max().unwrap_or(0)
    }

    pub fn min_row(&self) -> i8 {
        self.cells.iter().map(|&(_, r)| r).min().unwrap_or(0)
    }

    pub fn max_row(&self) -> i8 {
        self.cells.iter().map(|&(_, r)| r).max().unwrap_or(0)
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<ShapeKind> for Piece {
    fn from(kind: ShapeKind) -> Self {
        Self::create(kind)
    }
}
