//! Detection and correction driven by [`CosmeticParams`]
//!
//! The operations here tie the detector and the corrector together under a
//! single configuration record:
//!
//! - [`detect`] - find deviant pixels
//! - [`correct_all`] - repair a deviant list, honoring an aggregate override
//! - [`correct_defects`] - repair a mixed list of pixels and bad rows
//! - [`auto_correct`] - detect then repair in one call

use cosmetica_core::{PixView, PixViewMut, Sample, StatsRequest};
use cosmetica_stats::noise_order3;
use log::{debug, info};

use crate::correct::{correct_line, correct_points};
use crate::deviant::{DeviantPixel, DeviantScan, find_deviants, find_deviants_with_stats};
use crate::error::{FilterError, FilterResult, check_point, scratch};
use crate::neighborhood::{Aggregator, Exclusion, Geometry};
use crate::params::{CosmeticParams, SigmaSource};

/// A known sensor defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Defect {
    /// A single bad pixel
    Point(DeviantPixel),
    /// A whole bad row
    Line { row: u32 },
}

/// Outcome of [`auto_correct`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CosmeticReport {
    /// Cold pixels found
    pub cold: usize,
    /// Hot pixels found
    pub hot: usize,
    /// Pixels rewritten
    pub corrected: usize,
}

/// Find deviant pixels with the thresholds in `params`.
///
/// With [`SigmaSource::Noise3`] the thresholds are scaled by the 3rd-order
/// background noise instead of the image sigma; the median is the same in
/// both cases.
///
/// # Errors
///
/// Invalid thresholds and statistics failures; see
/// [`find_deviants`](crate::find_deviants). Noise estimation failures are
/// reported as [`FilterError::Stats`].
pub fn detect<T: Sample>(view: PixView<'_, T>, params: &CosmeticParams) -> FilterResult<DeviantScan> {
    let thresholds = params.thresholds()?;
    match params.sigma_source {
        SigmaSource::Statistics => find_deviants(view, &thresholds),
        SigmaSource::Noise3 => {
            if thresholds.is_disabled() {
                return Ok(DeviantScan::default());
            }
            let mut stats = view.statistics(None, StatsRequest::NONE)?;
            let n3 = noise_order3(view.data(), view.width() as usize, view.height() as usize, None)?;
            debug!("detect: noise3 sigma {:.4} over {} good samples", n3.noise, n3.good_count);
            stats.sigma = n3.noise;
            find_deviants_with_stats(view, &stats, &thresholds)
        }
    }
}

/// Repair deviant pixels with snapshot semantics.
///
/// Hot pixels use the mean and cold pixels the median, unless
/// `params.aggregator_override` forces one aggregate for all.
///
/// # Errors
///
/// Same as [`correct_many`](crate::correct_many).
pub fn correct_all<T: Sample>(
    view: &mut PixViewMut<'_, T>,
    deviants: &[DeviantPixel],
    params: &CosmeticParams,
) -> FilterResult<usize> {
    match params.aggregator_override {
        Some(agg) => correct_points(view, deviants, params.is_cfa, |_| agg),
        None => correct_points(view, deviants, params.is_cfa, |kind| kind.repair_aggregator()),
    }
}

/// Repair a defect list: all points first, then rows in list order.
///
/// Rows are repaired with the median unless an aggregate override is set.
///
/// # Returns
///
/// The number of pixels written.
///
/// # Errors
///
/// Every point and row is checked before anything is written: an
/// out-of-range coordinate ([`FilterError::InvalidGeometry`]) or a row with
/// no neighbor rows ([`FilterError::EmptyNeighborhood`]) leaves the buffer
/// untouched.
pub fn correct_defects<T: Sample>(
    view: &mut PixViewMut<'_, T>,
    defects: &[Defect],
    params: &CosmeticParams,
) -> FilterResult<usize> {
    let (width, height) = (view.width(), view.height());
    let line_aggregator = params.aggregator_override.unwrap_or(Aggregator::Median);
    let line_geometry = Geometry::new(line_aggregator, params.is_cfa);
    for defect in defects {
        if let Defect::Line { row } = *defect {
            check_point(0, row, width, height)?;
            // Row exclusion depends on the row only, so column 0 speaks for all.
            if line_geometry.neighbors(0, row, width, height, Exclusion::Row).next().is_none() {
                return Err(FilterError::EmptyNeighborhood { x: 0, y: row });
            }
        }
    }

    let mut points = scratch(defects.len())?;
    points.extend(defects.iter().filter_map(|d| match d {
        Defect::Point(p) => Some(*p),
        Defect::Line { .. } => None,
    }));
    let mut corrected = correct_all(view, &points, params)?;

    for defect in defects {
        if let Defect::Line { row } = *defect {
            correct_line(view, row, line_aggregator, params.is_cfa)?;
            corrected += width as usize;
        }
    }
    Ok(corrected)
}

/// Detect deviant pixels and repair them in place.
///
/// # Errors
///
/// Propagates errors from [`detect`] and [`correct_all`].
pub fn auto_correct<T: Sample>(view: &mut PixViewMut<'_, T>, params: &CosmeticParams) -> FilterResult<CosmeticReport> {
    let scan = detect(view.as_view(), params)?;
    let corrected = correct_all(view, &scan.deviants, params)?;
    let report = CosmeticReport {
        cold: scan.cold,
        hot: scan.hot,
        corrected,
    };
    info!(
        "auto_correct: {} cold, {} hot, {} pixels corrected (cfa: {})",
        report.cold, report.hot, report.corrected, params.is_cfa
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deviant::DeviantKind;
    use cosmetica_core::Pix;

    #[test]
    fn test_override_forces_aggregate() {
        #[rustfmt::skip]
        let base = Pix::<u16>::from_vec(3, 3, vec![
            10, 10, 10,
            10, 99, 10,
            10, 10, 90,
        ]).unwrap();
        let hot = [DeviantPixel::new(1, 1, DeviantKind::Hot)];

        let mut mean = base.clone();
        correct_all(&mut mean.view_mut(), &hot, &CosmeticParams::default()).unwrap();
        // (7 * 10 + 90) / 8 = 20
        assert_eq!(mean.get_pixel(1, 1), Some(20));

        let mut median = base.clone();
        let params = CosmeticParams::default().with_aggregator(Aggregator::Median);
        correct_all(&mut median.view_mut(), &hot, &params).unwrap();
        assert_eq!(median.get_pixel(1, 1), Some(10));
    }

    #[test]
    fn test_correct_defects_points_then_lines() {
        #[rustfmt::skip]
        let mut pix = Pix::<u16>::from_vec(3, 4, vec![
            5, 5, 5,
            5, 5, 5,
            0, 0, 0,
            5, 5, 5,
        ]).unwrap();
        let defects = [
            Defect::Line { row: 2 },
            Defect::Point(DeviantPixel::new(0, 0, DeviantKind::Cold)),
        ];
        let n = correct_defects(&mut pix.view_mut(), &defects, &CosmeticParams::default()).unwrap();
        assert_eq!(n, 4);
        assert!(pix.data().iter().all(|&v| v == 5));
    }

    #[test]
    fn test_auto_correct_report() {
        let mut pix = Pix::<u16>::new_filled(9, 9, 200).unwrap();
        // sigma ~ 50: hot above 350, cold below 50
        pix.set_pixel(4, 4, 600).unwrap();
        pix.set_pixel(1, 7, 0).unwrap();
        let report = auto_correct(&mut pix.view_mut(), &CosmeticParams::default()).unwrap();
        assert_eq!(
            report,
            CosmeticReport {
                cold: 1,
                hot: 1,
                corrected: 2
            }
        );
        assert_eq!(pix.get_pixel(4, 4), Some(200));
        assert_eq!(pix.get_pixel(1, 7), Some(200));
    }

    #[test]
    fn test_detect_rejects_bad_params() {
        let pix = Pix::<u16>::new_filled(4, 4, 1).unwrap();
        let params = CosmeticParams::default().with_sigma_low(f64::INFINITY);
        assert!(detect(pix.view(), &params).is_err());
    }

    #[test]
    fn test_correct_defects_bad_row_leaves_points_unwritten() {
        let mut pix = Pix::<u16>::new_filled(5, 5, 100).unwrap();
        pix.set_pixel(2, 2, 9000).unwrap();
        let before = pix.clone();
        let defects = [
            Defect::Point(DeviantPixel::new(2, 2, DeviantKind::Hot)),
            Defect::Line { row: 99 },
        ];
        let err = correct_defects(&mut pix.view_mut(), &defects, &CosmeticParams::default()).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidGeometry {
                x: 0,
                y: 99,
                width: 5,
                height: 5
            }
        ));
        assert_eq!(pix, before);
        assert_eq!(pix.get_pixel(2, 2), Some(9000));
    }

    #[test]
    fn test_correct_defects_line_without_neighbors_leaves_points_unwritten() {
        let mut pix = Pix::<u16>::from_vec(5, 1, vec![10, 10, 90, 10, 10]).unwrap();
        let defects = [
            Defect::Point(DeviantPixel::new(2, 0, DeviantKind::Hot)),
            Defect::Line { row: 0 },
        ];
        let err = correct_defects(&mut pix.view_mut(), &defects, &CosmeticParams::default()).unwrap_err();
        assert!(matches!(err, FilterError::EmptyNeighborhood { x: 0, y: 0 }));
        assert_eq!(pix.data(), &[10, 10, 90, 10, 10]);
    }

    #[test]
    fn test_detect_sigma_source() {
        // One sample a single count above a flat background: the image sigma
        // is 0.1, the 3rd-order noise about 0.6.
        let mut pix = Pix::<u16>::new_filled(10, 10, 1000).unwrap();
        pix.set_pixel(5, 5, 1001).unwrap();

        let by_stats = detect(pix.view(), &CosmeticParams::default()).unwrap();
        assert_eq!(by_stats.deviants, vec![DeviantPixel::new(5, 5, DeviantKind::Hot)]);

        let params = CosmeticParams::default().with_sigma_source(SigmaSource::Noise3);
        let by_noise = detect(pix.view(), &params).unwrap();
        assert!(by_noise.is_empty());

        let off = params.with_sigma_low(-1.0).with_sigma_high(-1.0);
        assert!(detect(pix.view(), &off).unwrap().is_empty());
    }
}
