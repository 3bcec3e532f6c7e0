//! Grid module - cell storage, placement testing and row removal
//!
//! The grid is a `rows x cols` array where each cell holds a [`ShapeKind`],
//! `Empty` meaning unoccupied. Uses a flat row-major vector so whole rows can be
//! moved with `copy_within`.
//! Coordinates: `(row, col)`; row 0 is the top, col 0 is the left edge.
//!
//! The falling piece is tracked separately as the current placement and is not
//! written into the cells until [`Grid::plant`].

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::types::{PlaceOutcome, ShapeKind, BOARD_COLS, BOARD_ROWS};

/// A piece and the grid position of its pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    pub row: i32,
    pub col: i32,
}

impl Placement {
    /// Absolute `(row, col)` of each of the four cells
    pub fn cells(&self) -> [(i32, i32); 4] {
        (*self.piece.offsets()).map(|(dc, dr)| (self.row + i32::from(dr), self.col + i32::from(dc)))
    }
}

/// Board cell storage with an optional falling piece
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<ShapeKind>,
    current: Option<Placement>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        Self {
            rows,
            cols,
            cells: vec![ShapeKind::Empty; rows * cols],
            current: None,
        }
    }

    /// The 22 x 10 playfield
    pub fn standard() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLS)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Empty every cell and forget the current piece
    pub fn clear(&mut self) {
        self.cells.fill(ShapeKind::Empty);
        self.current = None;
    }

    /// Kind stored at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> ShapeKind {
        self.cells[self.index(row, col)]
    }

    /// Overwrite one cell. Used to lay out fixtures and preview boards.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn set_cell(&mut self, row: usize, col: usize, kind: ShapeKind) {
        let idx = self.index(row, col);
        self.cells[idx] = kind;
    }

    /// Flat row-major view of all cells
    pub fn cells(&self) -> &[ShapeKind] {
        &self.cells
    }

    /// One row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside the grid.
    pub fn row(&self, row: usize) -> &[ShapeKind] {
        let start = self.index(row, 0);
        &self.cells[start..start + self.cols]
    }

    /// Check whether `piece` would fit with its pivot at `(row, col)`.
    ///
    /// Cells are checked in offset order and the first failure wins. For each
    /// cell the horizontal bounds are checked before the vertical bounds and
    /// occupancy, so a cell past the left wall reports `Left` even if it is
    /// also above the top.
    pub fn test(&self, piece: &Piece, row: i32, col: i32) -> PlaceOutcome {
        for &(dc, dr) in piece.offsets() {
            let r = row + i32::from(dr);
            let c = col + i32::from(dc);
            if c < 0 {
                return PlaceOutcome::Left;
            }
            if c >= self.cols as i32 {
                return PlaceOutcome::Right;
            }
            if r < 0 || r >= self.rows as i32 || !self.cell_at(r as usize, c as usize).is_empty() {
                return PlaceOutcome::Touch;
            }
        }
        PlaceOutcome::Ok
    }

    /// Test `piece` at `(row, col)` and, if it fits, make it the current piece.
    ///
    /// Nothing changes unless the result is `Ok`.
    pub fn test_and_place(&mut self, piece: Piece, row: i32, col: i32) -> PlaceOutcome {
        let outcome = self.test(&piece, row, col);
        if outcome.is_ok() {
            self.current = Some(Placement { piece, row, col });
        }
        outcome
    }

    /// Write the current piece into the cells.
    ///
    /// # Panics
    ///
    /// Panics if there is no current piece.
    pub fn plant(&mut self) {
        let Some(current) = self.current else {
            panic!("plant() called with no current piece");
        };
        let kind = current.piece.kind();
        for (r, c) in current.cells() {
            self.set_cell(r as usize, c as usize, kind);
        }
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        self.row(row).iter().all(|cell| !cell.is_empty())
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.rows).filter(|&r| self.is_row_full(r)).collect()
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Remaining rows keep their relative order and settle to the bottom; the
    /// same number of empty rows appear at the top. Full rows need not be
    /// contiguous.
    pub fn winnow(&mut self) -> usize {
        let cols = self.cols;
        let mut write_row = self.rows;
        let mut removed = 0;

        // Two pointers, bottom to top: keep non-full rows, skip full ones.
        for read_row in (0..self.rows).rev() {
            if self.is_row_full(read_row) {
                removed += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * cols;
                    self.cells.copy_within(src..src + cols, write_row * cols);
                }
            }
        }

        self.cells[..write_row * cols].fill(ShapeKind::Empty);
        removed
    }

    /// The falling piece, or [`Piece::EMPTY`] when there is none
    pub fn current_piece(&self) -> Piece {
        self.current.map_or(Piece::EMPTY, |p| p.piece)
    }

    /// Pivot row of the falling piece, 0 when there is none
    pub fn current_row(&self) -> i32 {
        self.current.map_or(0, |p| p.row)
    }

    /// Pivot column of the falling piece, 0 when there is none
    pub fn current_column(&self) -> i32 {
        self.current.map_or(0, |p| p.col)
    }

    pub fn current(&self) -> Option<Placement> {
        self.current
    }

    /// Absolute `(row, col)` cells of the falling piece
    pub fn current_cells(&self) -> Option<[(i32, i32); 4]> {
        self.current.map(|p| p.cells())
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// Forget the current piece without touching the cells
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Pivot row the current piece would land at if dropped straight down
    pub fn landing_row(&self) -> Option<i32> {
        let current = self.current?;
        let mut row = current.row;
        while self.test(&current.piece, row + 1, current.col).is_ok() {
            row += 1;
        }
        Some(row)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::standard()
    }
}
