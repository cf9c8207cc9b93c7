//! Generic utility primitives with zero domain knowledge.
//!
//! - `args` - CLI argument normalization
//! - `command` - Process spawning with inherited stdio
//! - `io` - File I/O with consistent error handling
//! - `validation` - Input validation helpers

pub mod args;
pub mod command;
pub mod io;
pub mod validation;
