//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Command execution and process spawning with error handling
//! - `fs` - File and directory operations with consistent error handling

pub mod command;
pub mod fs;
