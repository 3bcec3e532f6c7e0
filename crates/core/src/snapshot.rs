//! Presentation view of an engine
//!
//! A [`GameSnapshot`] copies out everything a renderer or a recorder needs in
//! one value. It owns its buffers, so [`GameEngine::snapshot_into`] can refill
//! the same snapshot every frame without allocating.
//!
//! [`GameEngine::snapshot_into`]: crate::engine::GameEngine::snapshot_into

use serde::{Deserialize, Serialize};

use crate::grid::Placement;
use crate::types::{Phase, ShapeKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Landed cells, row-major; the falling piece is in `current`
    pub cells: Vec<ShapeKind>,
    pub current: Option<Placement>,
    /// Pivot row the falling piece would land at
    pub ghost_row: Option<i32>,
    pub next_queue: Vec<ShapeKind>,
    pub held: Option<ShapeKind>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub step_interval_ms: u32,
    pub high_score: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    /// Kind shown at `(row, col)`, including the falling piece
    pub fn visible_cell(&self, row: usize, col: usize) -> ShapeKind {
        if let Some(current) = self.current {
            let (r, c) = (row as i32, col as i32);
            if current.cells().contains(&(r, c)) {
                return current.piece.kind();
            }
        }
        self.cells
            .get(row * self.cols + col)
            .copied()
            .unwrap_or(ShapeKind::Empty)
    }

    /// Whether `(row, col)` is covered by the ghost of the falling piece
    pub fn is_ghost_cell(&self, row: usize, col: usize) -> bool {
        let (Some(current), Some(ghost_row)) = (self.current, self.ghost_row) else {
            return false;
        };
        let ghost = Placement {
            row: ghost_row,
            ..current
        };
        ghost.cells().contains(&(row as i32, col as i32))
    }
}
