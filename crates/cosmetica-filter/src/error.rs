//! Error types for cosmetica-filter
//!
//! Every failure leaves the caller's buffer untouched for the pixel or row
//! being corrected.

use thiserror::Error;

/// Errors that can occur during detection and correction
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] cosmetica_core::Error),

    /// Statistics error
    #[error("stats error: {0}")]
    Stats(#[from] cosmetica_stats::StatsError),

    /// Requested coordinate lies outside the image
    #[error("({x}, {y}) is outside the {width}x{height} image")]
    InvalidGeometry {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// No in-bounds neighbor is available to repair a pixel
    #[error("no neighbors available to correct ({x}, {y})")]
    EmptyNeighborhood { x: u32, y: u32 },

    /// Scratch buffer could not be allocated
    #[error("scratch allocation of {requested} elements failed")]
    AllocationFailure { requested: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Allocate per-call scratch, reporting failure as
/// [`FilterError::AllocationFailure`].
pub(crate) fn scratch<T>(capacity: usize) -> FilterResult<Vec<T>> {
    cosmetica_core::scratch::try_with_capacity(capacity).map_err(|e| match e {
        cosmetica_core::Error::AllocationFailed { requested } => {
            FilterError::AllocationFailure { requested }
        }
        other => FilterError::Core(other),
    })
}

/// Reject coordinates outside `width x height`.
pub(crate) fn check_point(x: u32, y: u32, width: u32, height: u32) -> FilterResult<()> {
    if x >= width || y >= height {
        return Err(FilterError::InvalidGeometry {
            x,
            y,
            width,
            height,
        });
    }
    Ok(())
}
