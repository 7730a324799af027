//! Error types for cosmetica-stats

use thiserror::Error;

/// Errors that can occur while estimating statistics
#[derive(Debug, Error)]
pub enum StatsError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] cosmetica_core::Error),

    /// Scratch buffer could not be allocated
    #[error("out of memory allocating {requested} scratch elements")]
    OutOfMemory { requested: usize },
}

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Allocate per-call scratch, reporting failure as [`StatsError::OutOfMemory`].
pub(crate) fn scratch<T>(capacity: usize) -> StatsResult<Vec<T>> {
    cosmetica_core::scratch::try_with_capacity(capacity).map_err(|e| match e {
        cosmetica_core::Error::AllocationFailed { requested } => StatsError::OutOfMemory { requested },
        other => StatsError::Core(other),
    })
}

/// Check that `data` holds at least `nx * ny` samples.
pub(crate) fn check_rows(len: usize, nx: usize, ny: usize) -> StatsResult<()> {
    let expected = nx.checked_mul(ny).ok_or_else(|| {
        cosmetica_core::Error::InvalidParameter(format!("{} x {} rows overflow", nx, ny))
    })?;
    if len < expected {
        return Err(cosmetica_core::Error::BufferSizeMismatch {
            expected,
            actual: len,
        }
        .into());
    }
    Ok(())
}
