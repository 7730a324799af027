//! Cosmetic correction
//!
//! Replaces flagged pixels with an aggregate of their neighborhood:
//!
//! - [`correct_point`] repairs one pixel from the window around it
//! - [`correct_line`] repairs a whole row from the rows above and below
//! - [`correct_many`] repairs a list of deviant pixels, hot ones with the
//!   mean and cold ones with the median
//!
//! None of these calls writes anything unless every replacement value could
//! be computed.

use cosmetica_core::{PixView, PixViewMut, Sample};
use log::{debug, warn};

use crate::deviant::{DeviantKind, DeviantPixel};
use crate::error::{FilterError, FilterResult, check_point, scratch};
use crate::neighborhood::{Aggregator, Exclusion, Geometry, Neighborhood};

/// Replacement value for `(x, y)` read from `view`.
fn point_value<T: Sample>(view: PixView<'_, T>, x: u32, y: u32, geometry: Geometry) -> FilterResult<T> {
    Neighborhood::collect(view, x, y, geometry, Exclusion::Center)
        .aggregate(geometry.aggregator())
        .ok_or(FilterError::EmptyNeighborhood { x, y })
}

/// Repair one pixel in place and return the value written.
///
/// # Arguments
///
/// * `view` - Image to modify
/// * `x`, `y` - Pixel to repair
/// * `aggregator` - Median (5x5 window) or mean (3x3 window)
/// * `is_cfa` - Restrict the window to the pixel's Bayer color
///
/// # Errors
///
/// Returns [`FilterError::InvalidGeometry`] if `(x, y)` is outside the image
/// and [`FilterError::EmptyNeighborhood`] if no neighbor lies inside it
/// (a 1x1 image). The buffer is untouched on error.
pub fn correct_point<T: Sample>(
    view: &mut PixViewMut<'_, T>,
    x: u32,
    y: u32,
    aggregator: Aggregator,
    is_cfa: bool,
) -> FilterResult<T> {
    check_point(x, y, view.width(), view.height())?;
    let value = point_value(view.as_view(), x, y, Geometry::new(aggregator, is_cfa))?;
    view.set_pixel(x, y, value)?;
    Ok(value)
}

/// Repair a whole row from the rows around it.
///
/// Every column is replaced by the aggregate of the window centred on it,
/// leaving out the entire target row. All values are computed before the
/// row is overwritten.
///
/// # Errors
///
/// Returns [`FilterError::InvalidGeometry`] if `row` is outside the image,
/// [`FilterError::EmptyNeighborhood`] if some column has no neighbor in
/// another row (e.g. a single-row image), and
/// [`FilterError::AllocationFailure`] if the temporary row cannot be
/// allocated. The row is untouched on error.
pub fn correct_line<T: Sample>(
    view: &mut PixViewMut<'_, T>,
    row: u32,
    aggregator: Aggregator,
    is_cfa: bool,
) -> FilterResult<()> {
    let (width, height) = (view.width(), view.height());
    check_point(0, row, width, height)?;
    let geometry = Geometry::new(aggregator, is_cfa);
    debug!(
        "correct_line: row {} with {:?}, step {}, radius {}",
        row,
        aggregator,
        geometry.step(),
        geometry.radius()
    );

    let mut replacement = scratch(width as usize)?;
    let src = view.as_view();
    for x in 0..width {
        let value = Neighborhood::collect(src, x, row, geometry, Exclusion::Row)
            .aggregate(aggregator)
            .ok_or_else(|| {
                warn!("correct_line: row {} has no neighbor rows in a {}x{} image", row, width, height);
                FilterError::EmptyNeighborhood { x, y: row }
            })?;
        replacement.push(value);
    }

    let dst = view.row_mut(row).ok_or(FilterError::InvalidGeometry {
        x: 0,
        y: row,
        width,
        height,
    })?;
    dst.copy_from_slice(&replacement);
    Ok(())
}

/// Repair a list of pixels against a snapshot of the buffer.
///
/// All coordinates are validated and all replacement values computed from
/// the buffer as it was on entry; only then are they written, in list order.
/// Neighboring deviants therefore never see each other's repaired values.
pub(crate) fn correct_points<T, F>(
    view: &mut PixViewMut<'_, T>,
    deviants: &[DeviantPixel],
    is_cfa: bool,
    aggregator_for: F,
) -> FilterResult<usize>
where
    T: Sample,
    F: Fn(DeviantKind) -> Aggregator,
{
    let (width, height) = (view.width(), view.height());
    for d in deviants {
        check_point(d.x, d.y, width, height)?;
    }

    let mut values = scratch(deviants.len())?;
    let src = view.as_view();
    for d in deviants {
        let geometry = Geometry::new(aggregator_for(d.kind), is_cfa);
        values.push(point_value(src, d.x, d.y, geometry)?);
    }

    for (d, &v) in deviants.iter().zip(&values) {
        view.set_pixel(d.x, d.y, v)?;
    }
    Ok(values.len())
}

/// Repair deviant pixels: hot pixels with the mean, cold ones with the
/// median.
///
/// Every replacement is computed from the buffer as it was when the call
/// started, so the result does not depend on list order.
///
/// # Returns
///
/// The number of pixels written.
///
/// # Errors
///
/// Returns [`FilterError::InvalidGeometry`] if any coordinate is outside
/// the image, [`FilterError::EmptyNeighborhood`] for a 1x1 image, and
/// [`FilterError::AllocationFailure`] if the value list cannot be
/// allocated. Nothing is written on error.
pub fn correct_many<T: Sample>(
    view: &mut PixViewMut<'_, T>,
    deviants: &[DeviantPixel],
    is_cfa: bool,
) -> FilterResult<usize> {
    correct_points(view, deviants, is_cfa, DeviantKind::repair_aggregator)
}
