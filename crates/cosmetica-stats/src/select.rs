//! Order statistic selection
//!
//! Lower-median selection by partitioning. [`quick_select`] reorders the
//! slice it is given, so callers pass a disposable scratch slice or use
//! [`quick_select_copy`], which never touches the caller's data.

use std::cmp::Ordering;

use crate::error::{StatsResult, scratch};

/// Select the lower median (rank `(n - 1) / 2`) of a disposable slice.
///
/// The slice is partially reordered. Incomparable values (NaN) compare as
/// equal. Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use cosmetica_stats::quick_select;
///
/// let mut v = [5u16, 1, 4, 2];
/// assert_eq!(quick_select(&mut v), Some(2));
/// ```
pub fn quick_select<T: PartialOrd + Copy>(values: &mut [T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let rank = (values.len() - 1) / 2;
    let (_, m, _) =
        values.select_nth_unstable_by(rank, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(*m)
}

/// Select the lower median of a copy of `values`.
///
/// # Errors
///
/// Returns [`StatsError::OutOfMemory`](crate::StatsError::OutOfMemory) if
/// the scratch copy cannot be allocated.
pub fn quick_select_copy<T: PartialOrd + Copy>(values: &[T]) -> StatsResult<Option<T>> {
    let mut copy = scratch(values.len())?;
    copy.extend_from_slice(values);
    Ok(quick_select(&mut copy))
}
