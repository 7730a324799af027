//! Background noise estimators
//!
//! Two estimates of the background noise level of an image, both computed
//! per row and then combined across rows so that stars and gradients have
//! little influence:
//!
//! - [`noise_order1`]: sigma of 1st-order differences with 5-sigma clipping,
//!   `noise = 1/sqrt(2) * median over rows`
//! - [`noise_order3`]: median of 3rd-order differences
//!   `|2 v(i) - v(i-2) - v(i+2)|`, `noise = 1.482602 / sqrt(6) * estimate`
//!
//! The buffer is read as `ny` rows of `nx` samples. Samples equal to the
//! optional null value are skipped, and differences are taken between
//! consecutive good samples.

use cosmetica_core::Sample;
use log::debug;

use crate::error::{StatsResult, check_rows, scratch};
use crate::mean_sigma::mean_sigma;
use crate::select::quick_select;

/// Clipping rounds for the 1st-order estimator
const NITER: usize = 3;

/// Clipping half-width in sigmas for the 1st-order estimator
const SIGMA_CLIP: f64 = 5.0;

/// Rejection half-width in sigmas across rows for the 3rd-order estimator
const ROW_CLIP: f64 = 4.5;

/// `1 / sqrt(2)`
const NOISE1_SCALE: f64 = 0.707_106_78;

/// `1.482602 / sqrt(6)`
const NOISE3_SCALE: f64 = 0.605_269_7;

/// Result of the 3rd-order estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Noise3<T: Sample> {
    /// Background noise estimate
    pub noise: f64,
    /// Smallest good sample (`T::MAX` when there are none)
    pub min: T,
    /// Largest good sample (0 when there are none)
    pub max: T,
    /// Number of good samples accounted for
    pub good_count: usize,
}

/// Median of row values, averaging the two central ones for even counts.
///
/// Sorts `values` in place.
fn central_value(values: &mut [f64]) -> f64 {
    match values.len() {
        0 => 0.0,
        1 => values[0],
        n => {
            values.sort_unstable_by(f64::total_cmp);
            0.5 * (values[(n - 1) / 2] + values[n / 2])
        }
    }
}

/// Treat short rows as one long row of `nx * ny` samples.
fn row_shape(nx: usize, ny: usize, min_len: usize) -> (usize, usize) {
    if nx < min_len { (nx * ny, 1) } else { (nx, ny) }
}

/// Estimate background noise from 1st-order pixel differences.
///
/// For every row the differences between consecutive good samples are
/// clipped at 5 sigma (up to 3 rounds, stopping as soon as nothing is
/// rejected) and the remaining sigma is kept. The result is the median of
/// those per-row sigmas divided by `sqrt(2)`.
///
/// Rows shorter than 3 samples are joined into a single row; if that is
/// still shorter than 3 the estimate is 0.
///
/// # Errors
///
/// Returns [`StatsError::Core`](crate::StatsError::Core) if `data` holds
/// fewer than `nx * ny` samples and
/// [`StatsError::OutOfMemory`](crate::StatsError::OutOfMemory) if scratch
/// allocation fails.
pub fn noise_order1<T: Sample>(data: &[T], nx: usize, ny: usize, null: Option<T>) -> StatsResult<f64> {
    check_rows(data.len(), nx, ny)?;
    let (nx, ny) = row_shape(nx, ny, 3);
    if nx < 3 {
        return Ok(0.0);
    }

    let mut diffs: Vec<f64> = scratch(nx)?;
    let mut row_sigmas: Vec<f64> = scratch(ny)?;

    for row in data[..nx * ny].chunks_exact(nx) {
        diffs.clear();
        let mut good = row.iter().copied().filter(|&v| null != Some(v));
        let Some(mut prev) = good.next() else {
            continue;
        };
        for v in good {
            diffs.push(prev.to_f64() - v.to_f64());
            prev = v;
        }
        if diffs.len() < 2 {
            continue;
        }

        let mut ms = mean_sigma(&diffs, None);
        if ms.sigma > 0.0 {
            for _ in 0..NITER {
                let mean = ms.mean;
                let limit = SIGMA_CLIP * ms.sigma;
                let before = diffs.len();
                diffs.retain(|&d| (d - mean).abs() < limit);
                if diffs.len() == before {
                    break;
                }
                ms = mean_sigma(&diffs, None);
            }
        }
        row_sigmas.push(ms.sigma);
    }

    let rows = row_sigmas.len();
    let noise = NOISE1_SCALE * central_value(&mut row_sigmas);
    debug!("noise_order1: {} of {} rows usable, noise {:.4}", rows, ny, noise);
    Ok(noise)
}

/// Estimate background noise from 3rd-order pixel differences.
///
/// A window of five consecutive good samples `v1..v5` slides along each
/// row. Windows that are not constant contribute `|2 v3 - v1 - v5|`; the
/// per-row value is the lower median of those differences. Across rows the
/// mean of the row values is refined by one 4.5-sigma rejection pass, and
/// the estimate is scaled by `1.482602 / sqrt(6)`.
///
/// The minimum, maximum and count of good samples are returned alongside.
/// A row adds `windows + 4` to the count once it has four good samples, so
/// rows with fewer than four good samples add nothing. Rows shorter than 5
/// samples are joined into a single row; if that is still shorter than 5
/// only min/max/count are computed and the noise is 0.
///
/// # Errors
///
/// Same as [`noise_order1`].
pub fn noise_order3<T: Sample>(
    data: &[T],
    nx: usize,
    ny: usize,
    null: Option<T>,
) -> StatsResult<Noise3<T>> {
    check_rows(data.len(), nx, ny)?;
    let (nx, ny) = row_shape(nx, ny, 5);

    let mut result = Noise3 {
        noise: 0.0,
        min: T::MAX,
        max: T::default(),
        good_count: 0,
    };

    if nx < 5 {
        for &v in data[..nx].iter().filter(|&&v| null != Some(v)) {
            result.min = result.min.min(v);
            result.max = result.max.max(v);
            result.good_count += 1;
        }
        return Ok(result);
    }

    let mut diffs: Vec<u64> = scratch(nx)?;
    let mut row_values: Vec<f64> = scratch(ny)?;

    for row in data[..nx * ny].chunks_exact(nx) {
        diffs.clear();
        let mut window = [T::default(); 5];
        let mut filled = 0usize;
        let mut windows = 0usize;

        for &v in row.iter().filter(|&&v| null != Some(v)) {
            result.min = result.min.min(v);
            result.max = result.max.max(v);
            if filled < 4 {
                window[filled] = v;
                filled += 1;
                continue;
            }
            window[4] = v;
            windows += 1;
            let [v1, v2, v3, v4, v5] = window;
            if !(v1 == v2 && v2 == v3 && v3 == v4 && v4 == v5) {
                let d = 2 * v3.to_u64() as i64 - v1.to_u64() as i64 - v5.to_u64() as i64;
                diffs.push(d.unsigned_abs());
            }
            window.copy_within(1.., 0);
        }

        if filled < 4 {
            continue;
        }
        result.good_count += windows + 4;

        if let Some(m) = quick_select(&mut diffs) {
            row_values.push(m as f64);
        }
    }

    let estimate = match row_values.len() {
        0 => 0.0,
        1 => row_values[0],
        rows => {
            let ms = mean_sigma(&row_values, None);
            let limit = ROW_CLIP * ms.sigma;
            row_values.retain(|&d| (d - ms.mean).abs() <= limit);
            let refined = if row_values.len() != rows {
                mean_sigma(&row_values, None).mean
            } else {
                ms.mean
            };
            let median = central_value(&mut row_values);
            debug!(
                "noise_order3: {} rows, {} kept, median {:.4}, clipped mean {:.4}",
                rows,
                row_values.len(),
                median,
                refined
            );
            refined
        }
    };

    result.noise = NOISE3_SCALE * estimate;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_noise3_single_outlier_row() {
        let row = [10u16, 10, 10, 50, 10, 10, 10];
        let n3 = noise_order3(&row, 7, 1, None).unwrap();
        // windows give 0, 80, 0 -> lower median 0
        assert_eq!(n3.noise, 0.0);
        assert_eq!(n3.min, 10);
        assert_eq!(n3.max, 50);
        assert_eq!(n3.good_count, 7);

        let naive = crate::mean_sigma(&row, None).sigma;
        assert!(naive > 13.0);
        assert!(n3.noise < naive);
    }

    #[test]
    fn test_noise3_short_buffer() {
        let data = [5u16, 3, 9, 0];
        let n3 = noise_order3(&data, 2, 2, Some(0)).unwrap();
        assert_eq!(n3.noise, 0.0);
        assert_eq!(n3.min, 3);
        assert_eq!(n3.max, 9);
        assert_eq!(n3.good_count, 3);
    }

    #[test]
    fn test_noise3_narrow_rows_joined() {
        // 4 columns x 2 rows is read as one row of 8
        let data = [1u16, 2, 1, 2, 1, 2, 1, 2];
        let n3 = noise_order3(&data, 4, 2, None).unwrap();
        // every window alternates, |2 v3 - v1 - v5| = 0
        assert_eq!(n3.noise, 0.0);
        assert_eq!(n3.good_count, 8);
    }

    #[test]
    fn test_noise3_constant_rows_count_all_samples() {
        let data = [100u16; 30];
        let n3 = noise_order3(&data, 10, 3, None).unwrap();
        assert_eq!(n3.noise, 0.0);
        assert_eq!(n3.good_count, 30);
    }

    #[test]
    fn test_noise3_row_value_is_lower_median() {
        // windows: (0,0,4,0,0)->8, (0,4,0,0,2)->2, (4,0,0,2,0)->4, (0,0,2,0,0)->4
        let data = [0u16, 0, 4, 0, 0, 2, 0, 0];
        let n3 = noise_order3(&data, 8, 1, None).unwrap();
        // sorted 2, 4, 4, 8 -> rank 1 = 4
        assert_relative_eq!(n3.noise, NOISE3_SCALE * 4.0);
    }

    #[test]
    fn test_noise3_skips_nulls() {
        let with_nulls = [0u16, 10, 0, 10, 10, 50, 10, 0, 10, 10];
        let without = [10u16, 10, 10, 50, 10, 10, 10];
        let a = noise_order3(&with_nulls, 10, 1, Some(0)).unwrap();
        let b = noise_order3(&without, 7, 1, None).unwrap();
        assert_eq!(a.noise, b.noise);
        assert_eq!(a.min, 10);
    }

    #[test]
    fn test_noise1_linear_ramp_is_zero() {
        let data: Vec<u16> = (0..40).map(|i| 100 + (i % 10) * 3).collect();
        let n1 = noise_order1(&data, 10, 4, None).unwrap();
        assert_eq!(n1, 0.0);
    }

    #[test]
    fn test_noise1_alternating() {
        // differences alternate -2, +2: sigma 2
        let data = [10u16, 12, 10, 12, 10, 12, 10];
        let n1 = noise_order1(&data, 7, 1, None).unwrap();
        assert_relative_eq!(n1, NOISE1_SCALE * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_noise1_two_rows_average_central() {
        let data = [0u16, 2, 0, 2, 0, 0, 4, 0, 4, 0];
        let n1 = noise_order1(&data, 5, 2, None).unwrap();
        // row sigmas 2 and 4 -> median 3
        assert_relative_eq!(n1, NOISE1_SCALE * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_noise1_too_short() {
        assert_eq!(noise_order1(&[1u16, 5], 2, 1, None).unwrap(), 0.0);
        // a single column is read as one row: differences -4, 4, -4, 4
        let n1 = noise_order1(&[1u16, 5, 1, 5, 1], 1, 5, None).unwrap();
        assert_relative_eq!(n1, NOISE1_SCALE * 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_buffer_too_small() {
        assert!(noise_order1(&[1u16; 5], 3, 2, None).is_err());
        assert!(noise_order3(&[1u16; 9], 5, 2, None).is_err());
    }
}
