//! Blockfall (workspace facade crate).
//!
//! Re-exports the rule engine, shared types and key mapping from the crates
//! under `crates/`, plus the terminal front end used by the default binary.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub mod term;
