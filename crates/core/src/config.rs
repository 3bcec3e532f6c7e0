//! Engine configuration
//!
//! Every rule value the engine uses lives here, with the canonical values as
//! defaults. A config can be built in code, deserialized with serde, or read
//! from `BLOCKFALL_*` environment variables.
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_SEED`: piece supply seed (default: from OS entropy)
//! - `BLOCKFALL_ROWS` / `BLOCKFALL_COLS`: board size (default: 22 x 10)
//! - `BLOCKFALL_START_INTERVAL_MS`: gravity at level 0 (default: 750)
//! - `BLOCKFALL_MIN_INTERVAL_MS`: gravity floor (default: 20)
//! - `BLOCKFALL_INTERVAL_DECAY`: per-level multiplier (default: 0.875)
//! - `BLOCKFALL_LINES_PER_LEVEL`: default 10
//! - `BLOCKFALL_HOLD_ONCE`: "1" or "true" limits hold to once per piece
//! - `BLOCKFALL_HIGH_SCORE`: high score carried over from a previous session

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    BOARD_COLS, BOARD_ROWS, HARD_DROP_POINTS_PER_ROW, INTERVAL_DECAY, LINES_PER_LEVEL,
    LINE_SCORES, MIN_INTERVAL_MS, PREVIEW_DEPTH, SOFT_DROP_POINTS, SPAWN_ROW,
    STARTING_INTERVAL_MS,
};

/// Tunable rules for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// Pivot row for new pieces; the pivot column is always `cols / 2`
    pub spawn_row: i32,
    pub preview_depth: usize,
    pub starting_interval_ms: u32,
    pub min_interval_ms: u32,
    pub interval_decay: f64,
    pub lines_per_level: u32,
    /// Base award for 1, 2, 3 and 4 rows
    pub line_scores: [u32; 4],
    pub soft_drop_points: u32,
    pub hard_drop_points_per_row: u32,
    /// Allow only one hold per spawned piece
    pub hold_once_per_piece: bool,
    /// `None` seeds the piece supply from OS entropy
    pub seed: Option<u64>,
    pub high_score: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            spawn_row: SPAWN_ROW,
            preview_depth: PREVIEW_DEPTH,
            starting_interval_ms: STARTING_INTERVAL_MS,
            min_interval_ms: MIN_INTERVAL_MS,
            interval_decay: INTERVAL_DECAY,
            lines_per_level: LINES_PER_LEVEL,
            line_scores: LINE_SCORES,
            soft_drop_points: SOFT_DROP_POINTS,
            hard_drop_points_per_row: HARD_DROP_POINTS_PER_ROW,
            hold_once_per_piece: false,
            seed: None,
            high_score: 0,
        }
    }
}

impl EngineConfig {
    /// Defaults with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Defaults overlaid with any `BLOCKFALL_*` environment variables.
    ///
    /// Unset or unparsable variables keep the default.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        let hold_once_per_piece = env::var("BLOCKFALL_HOLD_ONCE")
            .map(|v| {
                let v = v.trim().to_ascii_lowercase();
                v == "1" || v == "true"
            })
            .unwrap_or(defaults.hold_once_per_piece);

        Self {
            rows: parsed("BLOCKFALL_ROWS").unwrap_or(defaults.rows),
            cols: parsed("BLOCKFALL_COLS").unwrap_or(defaults.cols),
            starting_interval_ms: parsed("BLOCKFALL_START_INTERVAL_MS")
                .unwrap_or(defaults.starting_interval_ms),
            min_interval_ms: parsed("BLOCKFALL_MIN_INTERVAL_MS")
                .unwrap_or(defaults.min_interval_ms),
            interval_decay: parsed("BLOCKFALL_INTERVAL_DECAY").unwrap_or(defaults.interval_decay),
            lines_per_level: parsed("BLOCKFALL_LINES_PER_LEVEL")
                .unwrap_or(defaults.lines_per_level),
            hold_once_per_piece,
            seed: parsed("BLOCKFALL_SEED"),
            high_score: parsed("BLOCKFALL_HIGH_SCORE").unwrap_or(defaults.high_score),
            ..defaults
        }
    }

    /// Check that the engine can run with these settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 4 || self.cols < 4 {
            return Err(ConfigError::BoardTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.spawn_row < 1 || self.spawn_row >= self.rows as i32 {
            return Err(ConfigError::SpawnRowOutOfRange {
                spawn_row: self.spawn_row,
                rows: self.rows,
            });
        }
        if self.preview_depth == 0 {
            return Err(ConfigError::EmptyPreview);
        }
        if !(self.interval_decay > 0.0 && self.interval_decay <= 1.0) {
            return Err(ConfigError::InvalidDecay {
                decay: self.interval_decay,
            });
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_interval_ms > self.starting_interval_ms {
            return Err(ConfigError::IntervalFloorAboveStart {
                min_ms: self.min_interval_ms,
                start_ms: self.starting_interval_ms,
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    /// Pivot column for new pieces
    pub fn spawn_column(&self) -> i32 {
        (self.cols / 2) as i32
    }
}
