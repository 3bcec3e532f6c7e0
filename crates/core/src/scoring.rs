//! Scoring module - line-clear awards, drop bonuses, level pacing
//!
//! All functions are pure and take the tunable values from [`EngineConfig`],
//! so alternative rule sets only need a different config.

use crate::config::EngineConfig;

/// Award for clearing `lines` rows with one piece.
///
/// `level` is the level after the clear has been counted. Zero or more than
/// four lines award nothing.
pub fn line_clear_score(config: &EngineConfig, lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > config.line_scores.len() {
        return 0;
    }
    config.line_scores[lines - 1].saturating_mul(level + 1)
}

/// Bonus for a hard drop that descended `rows` rows before locking
pub fn hard_drop_bonus(config: &EngineConfig, rows: u32) -> u32 {
    rows.saturating_mul(config.hard_drop_points_per_row)
}

/// Level reached after `total_lines` cleared lines
pub fn level_for_lines(config: &EngineConfig, total_lines: u32) -> u32 {
    total_lines / config.lines_per_level.max(1)
}

/// Gravity interval for `level`: the starting interval shrunk by the decay
/// factor once per level, rounded, never below the floor.
pub fn step_interval_ms(config: &EngineConfig, level: u32) -> u32 {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX);
    let scaled = f64::from(config.starting_interval_ms) * config.interval_decay.powi(exponent);
    let rounded = scaled.round();
    if rounded <= f64::from(config.min_interval_ms) {
        config.min_interval_ms
    } else {
        rounded as u32
    }
}
