//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. The engine only
//! ever sees commands, so another front end can bring its own mapping.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
