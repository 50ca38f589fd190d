//! Error types for envkv
//!
//! Provides a unified error type for all operations.
//!
//! Malformed on-region data is deliberately NOT represented here: garbage
//! spans are tolerated and skipped by every read/write path, and are only
//! observable through `Store::is_valid()`.

use thiserror::Error;

/// Result type alias using EnvError
pub type Result<T> = std::result::Result<T, EnvError>;

/// Unified error type for envkv operations
#[derive(Debug, Error)]
pub enum EnvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    // -------------------------------------------------------------------------
    // Capacity Errors
    // -------------------------------------------------------------------------
    #[error("capacity exhausted: entry needs {needed} bytes, {available} available")]
    CapacityExhausted { needed: usize, available: usize },

    // -------------------------------------------------------------------------
    // Backing Medium Errors
    // -------------------------------------------------------------------------
    #[error("storage medium error: {0}")]
    Medium(String),
}
