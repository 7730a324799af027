//! Error types for cosmetica-core
//!
//! Provides a unified error type for buffer construction, pixel access and
//! image statistics. Each variant captures enough context for diagnostics
//! without exposing internal implementation details.

use thiserror::Error;

/// cosmetica-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Sample slice length does not match the declared dimensions
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed
    #[error("memory allocation failed ({requested} elements)")]
    AllocationFailed { requested: usize },
}

/// Result type alias for cosmetica-core operations
pub type Result<T> = std::result::Result<T, Error>;
