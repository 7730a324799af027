//! Image statistics operations
//!
//! Global summary statistics of a single-channel image or of a rectangular
//! selection of it:
//!
//! - Mean, median, standard deviation
//! - Average absolute deviation and median absolute deviation (MAD)
//! - Minimum / maximum
//! - Biweight midvariance
//! - IKSS location and scale
//!
//! The deviant pixel detector only consumes `median` and `sigma`; the other
//! fields are computed on request for callers that report them.

use std::ops::BitOr;

use super::{Pix, PixView};
use crate::box_::Box;
use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::scratch;

/// Set of statistics to compute.
///
/// The median and the sample count are always computed. Flags combine with
/// `|`:
///
/// ```
/// use cosmetica_core::StatsRequest;
///
/// let req = StatsRequest::SIGMA | StatsRequest::MAD;
/// assert!(req.contains(StatsRequest::SIGMA));
/// assert!(!req.contains(StatsRequest::IKSS));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatsRequest(u32);

impl StatsRequest {
    /// Only the median and count
    pub const NONE: Self = Self(0);
    /// Arithmetic mean
    pub const MEAN: Self = Self(1);
    /// Sample standard deviation (implies the mean)
    pub const SIGMA: Self = Self(1 << 1);
    /// Average absolute deviation from the median
    pub const AVG_DEV: Self = Self(1 << 2);
    /// Median absolute deviation from the median
    pub const MAD: Self = Self(1 << 3);
    /// Minimum and maximum
    pub const MIN_MAX: Self = Self(1 << 4);
    /// Square root of the biweight midvariance (implies MAD)
    pub const BWMV: Self = Self(1 << 5);
    /// IKSS location and scale
    pub const IKSS: Self = Self(1 << 6);
    /// Mean, sigma and min/max
    pub const BASIC: Self = Self(Self::MEAN.0 | Self::SIGMA.0 | Self::MIN_MAX.0);
    /// Everything
    pub const ALL: Self = Self(0x7f);

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

impl BitOr for StatsRequest {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Summary statistics of an image or selection.
///
/// Fields that were not requested are left at 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageStats {
    /// Number of samples summarized
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Upper median (sample of rank `count / 2`)
    pub median: f64,
    /// Sample standard deviation (`count - 1` denominator)
    pub sigma: f64,
    /// Mean absolute deviation from the median
    pub avg_dev: f64,
    /// Median absolute deviation from the median
    pub mad: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Square root of the biweight midvariance
    pub sqrt_bwmv: f64,
    /// IKSS location estimate
    pub location: f64,
    /// IKSS scale estimate
    pub scale: f64,
    /// Largest representable sample value (normalization constant)
    pub norm_value: f64,
}

impl<'a, T: Sample> PixView<'a, T> {
    /// Compute summary statistics over the image or a selection of it.
    ///
    /// # Arguments
    ///
    /// * `selection` - Optional rectangle (None for the whole image); it is
    ///   clipped to the image first
    /// * `request` - Which statistics to compute besides the median
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the selection does not
    /// intersect the image and [`Error::AllocationFailed`] if the working
    /// copy cannot be allocated.
    pub fn statistics(&self, selection: Option<&Box>, request: StatsRequest) -> Result<ImageStats> {
        let mut samples = match selection {
            None => scratch::try_copy(self.data)?,
            Some(b) => {
                let clipped = b.clip_to(self.width, self.height).ok_or_else(|| {
                    Error::InvalidParameter(format!(
                        "selection {:?} does not intersect {}x{} image",
                        b, self.width, self.height
                    ))
                })?;
                let mut v = scratch::try_with_capacity(clipped.area() as usize)?;
                for y in clipped.y..clipped.bottom() {
                    let row = &self.data[(y as usize) * (self.width as usize)..];
                    v.extend_from_slice(&row[clipped.x as usize..clipped.right() as usize]);
                }
                v
            }
        };
        summarize(&mut samples, request)
    }
}

impl<T: Sample> Pix<T> {
    /// Compute summary statistics; see [`PixView::statistics`].
    pub fn statistics(&self, selection: Option<&Box>, request: StatsRequest) -> Result<ImageStats> {
        self.view().statistics(selection, request)
    }
}

/// Summarize a disposable working copy of the samples (it gets reordered).
fn summarize<T: Sample>(samples: &mut [T], request: StatsRequest) -> Result<ImageStats> {
    let n = samples.len();
    let mut stats = ImageStats {
        count: n,
        norm_value: T::max_f64(),
        ..ImageStats::default()
    };
    if n == 0 {
        return Ok(stats);
    }

    if request.intersects(StatsRequest::MEAN | StatsRequest::SIGMA) {
        let sum: f64 = samples.iter().map(|&v| v.to_f64()).sum();
        stats.mean = sum / n as f64;
    }

    if request.contains(StatsRequest::SIGMA) && n > 1 {
        let mean = stats.mean;
        let ss: f64 = samples
            .iter()
            .map(|&v| {
                let d = v.to_f64() - mean;
                d * d
            })
            .sum();
        stats.sigma = (ss / (n - 1) as f64).sqrt();
    }

    if request.contains(StatsRequest::MIN_MAX) {
        let (lo, hi) = samples
            .iter()
            .fold((T::MAX, T::default()), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        stats.min = lo.to_f64();
        stats.max = hi.to_f64();
    }

    // Median last among the sample passes: selection reorders the copy.
    let (_, median, _) = samples.select_nth_unstable(n / 2);
    stats.median = median.to_f64();
    let median = stats.median;

    if request.contains(StatsRequest::AVG_DEV) {
        let sum: f64 = samples.iter().map(|&v| (v.to_f64() - median).abs()).sum();
        stats.avg_dev = sum / n as f64;
    }

    if request.intersects(StatsRequest::MAD | StatsRequest::BWMV) {
        let mut devs = scratch::try_with_capacity(n)?;
        devs.extend(samples.iter().map(|&v| (v.to_f64() - median).abs()));
        stats.mad = upper_median(&mut devs);
        devs.clear();
        devs.extend(samples.iter().map(|&v| v.to_f64()));
        stats.sqrt_bwmv = biweight_midvariance(&devs, stats.mad, median).sqrt();
    }

    if request.contains(StatsRequest::IKSS) {
        let norm = stats.norm_value;
        let mut normalized = scratch::try_with_capacity(n)?;
        normalized.extend(samples.iter().map(|&v| v.to_f64() / norm));
        normalized.sort_unstable_by(f64::total_cmp);
        let (location, scale) = ikss(&normalized)?;
        stats.location = location * norm;
        stats.scale = scale * norm;
    }

    Ok(stats)
}

/// Upper median of a disposable slice (rank `n / 2`).
fn upper_median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mid = values.len() / 2;
    let (_, m, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    *m
}

/// Median of sorted data, averaging the two central values for even counts.
fn sorted_median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => 0.5 * (sorted[n / 2 - 1] + sorted[n / 2]),
    }
}

/// Biweight midvariance around `median` with tuning constant 9.
fn biweight_midvariance(values: &[f64], mad: f64, median: f64) -> f64 {
    if mad <= 0.0 {
        return 0.0;
    }
    let mut up = 0.0;
    let mut down = 0.0;
    for &x in values {
        let yi = (x - median) / (9.0 * mad);
        let yi2 = yi * yi;
        if yi.abs() < 1.0 {
            let d = x - median;
            let w = 1.0 - yi2;
            up += d * d * (w * w) * (w * w);
            down += w * (1.0 - 5.0 * yi2);
        }
    }
    if down == 0.0 {
        return 0.0;
    }
    values.len() as f64 * (up / (down * down))
}

/// Iterative k-sigma estimator of location and scale on sorted data.
///
/// Returns `(location, scale)`.
fn ikss(sorted: &[f64]) -> Result<(f64, f64)> {
    let mut i = 0usize;
    let mut j = sorted.len();
    let mut s0 = 1.0f64;
    let mut devs: Vec<f64> = scratch::try_with_capacity(sorted.len())?;

    loop {
        if j <= i {
            return Ok((0.0, 0.0));
        }
        let window = &sorted[i..j];
        let m = sorted_median(window);

        devs.clear();
        devs.extend(window.iter().map(|&x| (x - m).abs()));
        devs.sort_unstable_by(f64::total_cmp);
        let mad = sorted_median(&devs);

        let s = biweight_midvariance(window, mad, m).sqrt();
        if s < 2e-23 {
            return Ok((m, 0.0));
        }
        if (s0 - s) / s < 1e-5 {
            return Ok((m, 0.991 * s));
        }
        s0 = s;

        let xlow = m - 4.0 * s;
        let xhigh = m + 4.0 * s;
        while i < j && sorted[i] < xlow {
            i += 1;
        }
        while j > i && sorted[j - 1] > xhigh {
            j -= 1;
        }
    }
}
