//! Fallible scratch buffer allocation
//!
//! Every temporary buffer the engine needs (copies for selection, row
//! temporaries, difference arrays) goes through these helpers so that an
//! allocation failure surfaces as [`Error::AllocationFailed`] instead of
//! aborting the process.

use crate::error::{Error, Result};

/// Allocate an empty vector with room for exactly `capacity` elements.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the reservation fails.
pub fn try_with_capacity<T>(capacity: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(capacity)
        .map_err(|_| Error::AllocationFailed {
            requested: capacity,
        })?;
    Ok(v)
}

/// Allocate a vector of `len` copies of `fill`.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the reservation fails.
pub fn try_filled<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut v = try_with_capacity(len)?;
    v.resize(len, fill);
    Ok(v)
}

/// Copy a slice into a freshly allocated vector.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the reservation fails.
pub fn try_copy<T: Clone>(src: &[T]) -> Result<Vec<T>> {
    let mut v = try_with_capacity(src.len())?;
    v.extend_from_slice(src);
    Ok(v)
}
