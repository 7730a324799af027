//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Synthetic image could not be built
    #[error("failed to build synthetic image: {0}")]
    Synthetic(#[from] cosmetica_core::Error),

    /// Generator parameter out of range
    #[error("invalid generator parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
