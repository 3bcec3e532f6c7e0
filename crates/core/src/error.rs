//! Configuration error types.
//!
//! Gameplay never fails: illegal moves are rejected in-band and a blocked
//! spawn ends the round. The only recoverable errors are bad rule settings.

use derive_more::{Display, Error};

/// A rule setting that the engine cannot run with
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ConfigError {
    /// Board must fit every piece in every orientation
    #[display("board {rows}x{cols} is smaller than the 4x4 minimum")]
    BoardTooSmall { rows: usize, cols: usize },

    /// Spawn row must leave room for a piece's upward offsets
    #[display("spawn row {spawn_row} must lie in 1..{rows}")]
    SpawnRowOutOfRange { spawn_row: i32, rows: usize },

    #[display("preview depth must be at least 1")]
    EmptyPreview,

    /// Gravity must speed up, or stay constant, as the level rises
    #[display("interval decay {decay} must lie in (0, 1]")]
    InvalidDecay { decay: f64 },

    #[display("minimum interval {min_ms}ms exceeds starting interval {start_ms}ms")]
    IntervalFloorAboveStart { min_ms: u32, start_ms: u32 },

    #[display("minimum interval must be at least 1ms")]
    ZeroInterval,

    #[display("lines per level must be at least 1")]
    ZeroLinesPerLevel,
}
