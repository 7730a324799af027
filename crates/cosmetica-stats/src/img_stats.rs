//! Combined robust image statistics
//!
//! One entry point that runs the estimators selected by a [`NoiseRequest`]
//! and gathers their results in an [`ImgStats`].

use std::ops::BitOr;

use cosmetica_core::Sample;
use log::debug;

use crate::error::{StatsResult, check_rows};
use crate::mean_sigma::mean_sigma;
use crate::noise::{noise_order1, noise_order3};

/// Estimators to run in [`img_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoiseRequest(u32);

impl NoiseRequest {
    /// Mean and RMS sigma
    pub const MEAN_SIGMA: Self = Self(1);
    /// 1st-order noise
    pub const NOISE1: Self = Self(1 << 1);
    /// 3rd-order noise
    pub const NOISE3: Self = Self(1 << 2);
    /// Minimum and maximum (computed by the 3rd-order pass)
    pub const MIN_MAX: Self = Self(1 << 3);
    /// Everything
    pub const ALL: Self = Self(0xf);

    /// Check whether every flag of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether any flag of `other` is set in `self`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for NoiseRequest {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Robust summary of an image.
///
/// Fields whose estimator was not requested keep their default value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImgStats<T: Sample> {
    /// Number of good samples (from the 3rd-order pass when it ran)
    pub good_count: usize,
    /// Smallest good sample
    pub min: T,
    /// Largest good sample
    pub max: T,
    /// Mean of good samples
    pub mean: f64,
    /// RMS sigma of good samples
    pub sigma: f64,
    /// 1st-order background noise
    pub noise1: f64,
    /// 3rd-order background noise
    pub noise3: f64,
}

/// Compute the requested robust statistics of `ny` rows of `nx` samples.
///
/// # Arguments
///
/// * `data` - Row-major samples, at least `nx * ny` long
/// * `nx` - Samples per row
/// * `ny` - Number of rows
/// * `null` - Optional value marking missing samples
/// * `request` - Estimators to run
///
/// # Errors
///
/// Propagates the errors of [`noise_order1`] and [`noise_order3`].
pub fn img_stats<T: Sample>(
    data: &[T],
    nx: usize,
    ny: usize,
    null: Option<T>,
    request: NoiseRequest,
) -> StatsResult<ImgStats<T>> {
    check_rows(data.len(), nx, ny)?;
    let mut stats = ImgStats::default();

    if request.contains(NoiseRequest::MEAN_SIGMA) {
        let ms = mean_sigma(&data[..nx * ny], null);
        stats.good_count = ms.good_count;
        stats.mean = ms.mean;
        stats.sigma = ms.sigma;
    }

    if request.contains(NoiseRequest::NOISE1) {
        stats.noise1 = noise_order1(data, nx, ny, null)?;
    }

    if request.intersects(NoiseRequest::NOISE3 | NoiseRequest::MIN_MAX) {
        let n3 = noise_order3(data, nx, ny, null)?;
        stats.good_count = n3.good_count;
        stats.min = n3.min;
        stats.max = n3.max;
        stats.noise3 = n3.noise;
    }

    debug!(
        "img_stats {}x{}: good {}, mean {:.3}, sigma {:.3}, noise1 {:.3}, noise3 {:.3}",
        nx, ny, stats.good_count, stats.mean, stats.sigma, stats.noise1, stats.noise3
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_selects_estimators() {
        let data: Vec<u16> = (0..50).map(|i| 100 + (i % 5) as u16).collect();
        let only_mean = img_stats(&data, 10, 5, None, NoiseRequest::MEAN_SIGMA).unwrap();
        assert_eq!(only_mean.mean, 102.0);
        assert_eq!(only_mean.good_count, 50);
        assert_eq!(only_mean.noise1, 0.0);
        assert_eq!(only_mean.noise3, 0.0);
        assert_eq!(only_mean.max, 0);

        let range = img_stats(&data, 10, 5, None, NoiseRequest::MIN_MAX).unwrap();
        assert_eq!(range.min, 100);
        assert_eq!(range.max, 104);
        assert_eq!(range.mean, 0.0);
    }

    #[test]
    fn test_all() {
        let data = [10u16, 10, 10, 50, 10, 10, 10];
        let s = img_stats(&data, 7, 1, None, NoiseRequest::ALL).unwrap();
        assert_eq!(s.good_count, 7);
        assert_eq!(s.min, 10);
        assert_eq!(s.max, 50);
        assert!(s.sigma > 13.0);
        assert_eq!(s.noise3, 0.0);
        assert!(s.noise1 > 0.0);
    }

    #[test]
    fn test_request_flags() {
        let req = NoiseRequest::NOISE1 | NoiseRequest::NOISE3;
        assert!(req.contains(NoiseRequest::NOISE3));
        assert!(!req.contains(NoiseRequest::MEAN_SIGMA));
        assert!(NoiseRequest::ALL.contains(req));
    }
}
