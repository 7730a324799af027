//! Deviant pixel detection
//!
//! Classifies every pixel of an image against two global thresholds
//! derived from the image median and standard deviation:
//!
//! - cold: `value <= max(0, median - sigma_low * sigma)`
//! - hot: `value >= min(MAX, median + sigma_high * sigma)`
//!
//! Either threshold can be disabled. When the image is constant
//! (`sigma == 0`) both comparisons become strict, so nothing is flagged.

use cosmetica_core::{ImageStats, PixView, Sample, StatsRequest};
use log::{debug, info};

use crate::error::{FilterError, FilterResult, scratch};
use crate::neighborhood::Aggregator;

/// Raw threshold value meaning "this side is disabled"
pub const SIGMA_DISABLED: f64 = -1.0;

/// Which side of the distribution a deviant pixel lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviantKind {
    /// Abnormally low
    Cold,
    /// Abnormally high
    Hot,
}

impl DeviantKind {
    /// Aggregate used to repair this kind of pixel: mean for hot pixels,
    /// median for cold ones.
    pub fn repair_aggregator(self) -> Aggregator {
        match self {
            DeviantKind::Hot => Aggregator::Mean,
            DeviantKind::Cold => Aggregator::Median,
        }
    }
}

/// A flagged pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviantPixel {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// Hot or cold
    pub kind: DeviantKind,
}

impl DeviantPixel {
    /// Create a deviant pixel record.
    pub fn new(x: u32, y: u32, kind: DeviantKind) -> Self {
        Self { x, y, kind }
    }
}

/// Detection threshold multipliers, in units of sigma
///
/// `None` disables a side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Cold multiplier
    pub sigma_low: Option<f64>,
    /// Hot multiplier
    pub sigma_high: Option<f64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            sigma_low: Some(3.0),
            sigma_high: Some(3.0),
        }
    }
}

impl Thresholds {
    /// Validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if an enabled multiplier
    /// is negative or not finite.
    pub fn new(sigma_low: Option<f64>, sigma_high: Option<f64>) -> FilterResult<Self> {
        for (name, value) in [("sigma_low", sigma_low), ("sigma_high", sigma_high)] {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(FilterError::InvalidParameters(format!(
                    "{} must be finite and non-negative, got {:?}",
                    name, value
                )));
            }
        }
        Ok(Self {
            sigma_low,
            sigma_high,
        })
    }

    /// Thresholds from raw multipliers where [`SIGMA_DISABLED`] disables a
    /// side.
    ///
    /// # Errors
    ///
    /// Same as [`Thresholds::new`] for any other negative or non-finite
    /// value.
    pub fn from_raw(sigma_low: f64, sigma_high: f64) -> FilterResult<Self> {
        let enabled = |v: f64| if v == SIGMA_DISABLED { None } else { Some(v) };
        Self::new(enabled(sigma_low), enabled(sigma_high))
    }

    /// Both sides disabled.
    pub fn disabled() -> Self {
        Self {
            sigma_low: None,
            sigma_high: None,
        }
    }

    /// True when neither side is enabled.
    pub fn is_disabled(&self) -> bool {
        self.sigma_low.is_none() && self.sigma_high.is_none()
    }
}

/// Result of a detection scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviantScan {
    /// Flagged pixels in row-major order
    pub deviants: Vec<DeviantPixel>,
    /// Number of cold pixels
    pub cold: usize,
    /// Number of hot pixels
    pub hot: usize,
}

impl DeviantScan {
    /// Number of flagged pixels.
    pub fn len(&self) -> usize {
        self.deviants.len()
    }

    /// True when nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.deviants.is_empty()
    }

    /// Iterate over the flagged pixels in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, DeviantPixel> {
        self.deviants.iter()
    }
}

impl<'a> IntoIterator for &'a DeviantScan {
    type Item = &'a DeviantPixel;
    type IntoIter = std::slice::Iter<'a, DeviantPixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.deviants.iter()
    }
}

/// Absolute thresholds for one image.
#[derive(Debug, Clone, Copy)]
struct Limits {
    cold: Option<f64>,
    hot: Option<f64>,
    inclusive: bool,
}

impl Limits {
    fn new<T: Sample>(median: f64, sigma: f64, thresholds: &Thresholds) -> Self {
        Self {
            cold: thresholds.sigma_low.map(|k| (median - k * sigma).max(0.0)),
            hot: thresholds.sigma_high.map(|k| (median + k * sigma).min(T::max_f64())),
            inclusive: sigma > 0.0,
        }
    }

    fn classify(&self, value: f64) -> Option<DeviantKind> {
        let inclusive = self.inclusive;
        if self.hot.is_some_and(|hot| value > hot || (inclusive && value == hot)) {
            return Some(DeviantKind::Hot);
        }
        if self.cold.is_some_and(|cold| value < cold || (inclusive && value == cold)) {
            return Some(DeviantKind::Cold);
        }
        None
    }
}

/// Find hot and cold pixels using the image's own median and sigma.
///
/// # Arguments
///
/// * `view` - Image to scan
/// * `thresholds` - Cold/hot multipliers
///
/// # Errors
///
/// Returns [`FilterError::Core`] if the statistics cannot be computed and
/// [`FilterError::AllocationFailure`] if the result list cannot be
/// allocated. Finding nothing is not an error.
pub fn find_deviants<T: Sample>(view: PixView<'_, T>, thresholds: &Thresholds) -> FilterResult<DeviantScan> {
    if thresholds.is_disabled() {
        debug!("find_deviants: both thresholds disabled");
        return Ok(DeviantScan::default());
    }
    let stats = view.statistics(None, StatsRequest::SIGMA)?;
    find_deviants_with_stats(view, &stats, thresholds)
}

/// Find hot and cold pixels using a caller-supplied statistics summary.
///
/// Only `median` and `sigma` of `stats` are used.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if the summary's median or
/// sigma is not finite (or sigma is negative), and
/// [`FilterError::AllocationFailure`] if the result list cannot be
/// allocated.
pub fn find_deviants_with_stats<T: Sample>(
    view: PixView<'_, T>,
    stats: &ImageStats,
    thresholds: &Thresholds,
) -> FilterResult<DeviantScan> {
    if thresholds.is_disabled() {
        return Ok(DeviantScan::default());
    }
    if !stats.median.is_finite() || !stats.sigma.is_finite() || stats.sigma < 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "unusable statistics: median {}, sigma {}",
            stats.median, stats.sigma
        )));
    }

    let limits = Limits::new::<T>(stats.median, stats.sigma, thresholds);
    debug!(
        "find_deviants: median {:.3}, sigma {:.3}, cold <= {:?}, hot >= {:?}",
        stats.median, stats.sigma, limits.cold, limits.hot
    );

    // Count first so the result list is allocated once.
    let (mut cold, mut hot) = (0usize, 0usize);
    for &v in view.data() {
        match limits.classify(v.to_f64()) {
            Some(DeviantKind::Cold) => cold += 1,
            Some(DeviantKind::Hot) => hot += 1,
            None => {}
        }
    }

    let mut deviants = scratch(cold + hot)?;
    for (y, row) in view.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if let Some(kind) = limits.classify(v.to_f64()) {
                deviants.push(DeviantPixel::new(x as u32, y as u32, kind));
            }
        }
    }

    info!(
        "find_deviants: {} cold and {} hot pixels in {}x{} image",
        cold,
        hot,
        view.width(),
        view.height()
    );
    Ok(DeviantScan { deviants, cold, hot })
}
