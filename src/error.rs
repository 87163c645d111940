//! Error types for the command layer
//!
//! The cache itself is total and never fails; these errors come from parsing
//! and executing driver commands.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the command driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Unknown command verb
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Command is missing a required argument
    #[error("Missing argument for '{command}': {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the command driver.
pub type Result<T> = std::result::Result<T, CacheError>;
