//! Core game rules - pure, deterministic, and testable
//!
//! This crate holds the rule engine of the falling-block game. It has no
//! dependencies on terminals, timers, audio or storage. A presentation layer
//! drives it with commands and pacing ticks and reads state back out.
//!
//! - **Deterministic**: the piece supply is an explicitly seeded generator
//! - **Testable**: every rule is a plain method on owned state
//! - **Portable**: runs in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`piece`]: tetromino offsets and rotation math
//! - [`randomizer`]: 7-bag piece supply
//! - [`grid`]: cell storage, placement testing and row removal
//! - [`scoring`]: line-clear awards, drop bonuses and level pacing
//! - [`config`]: tunable rule values
//! - [`engine`]: the spawn, gravity, lock and clear cycle
//! - [`snapshot`]: a serializable view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameEngine;
//! use blockfall_core::types::{Command, Phase};
//!
//! let mut game = GameEngine::with_seed(12345);
//! game.apply(Command::Start);
//! assert_eq!(game.phase(), Phase::Running);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateClockwise);
//! game.apply(Command::HardDrop);
//!
//! // Hard drop awards points per row
//! assert!(game.score() > 0);
//!
//! // Next piece spawns on the following tick
//! game.on_pacing_tick();
//! assert_eq!(game.phase(), Phase::Running);
//! ```
//!
//! # Timing
//!
//! The engine never reads a clock. The caller ticks it every
//! [`GameEngine::step_interval_ms`] (750ms at level 0, shrinking by 0.875 per
//! level, floored at 20ms) and restarts its timer on
//! [`GameEvent::IntervalChanged`](types::GameEvent::IntervalChanged).

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod piece;
pub mod randomizer;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use engine::GameEngine;
pub use error::ConfigError;
pub use grid::{Grid, Placement};
pub use piece::{spawn_shape, Piece};
pub use randomizer::Randomizer;
pub use snapshot::GameSnapshot;
