//! Cosmetic correction parameters

use crate::deviant::{SIGMA_DISABLED, Thresholds};
use crate::error::FilterResult;
use crate::neighborhood::Aggregator;

/// Where detection takes its sigma from
///
/// The median always comes from the image statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SigmaSource {
    /// Sample standard deviation of the whole image
    #[default]
    Statistics,
    /// Background noise from 3rd-order differences, which stars, gradients
    /// and the defects themselves barely move
    Noise3,
}

/// Options for detection and correction
///
/// # Examples
///
/// ```
/// use cosmetica_filter::{Aggregator, CosmeticParams};
///
/// let params = CosmeticParams::new()
///     .with_sigma_low(-1.0)
///     .with_sigma_high(5.0)
///     .with_cfa(true)
///     .with_aggregator(Aggregator::Median);
/// assert_eq!(params.sigma_low, None);
/// assert_eq!(params.sigma_high, Some(5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosmeticParams {
    /// Cold threshold multiplier (None = disabled)
    pub sigma_low: Option<f64>,
    /// Hot threshold multiplier (None = disabled)
    pub sigma_high: Option<f64>,
    /// Image is a Bayer mosaic
    pub is_cfa: bool,
    /// Force one aggregate for every repaired pixel
    pub aggregator_override: Option<Aggregator>,
    /// Sigma used to place the thresholds
    pub sigma_source: SigmaSource,
}

impl Default for CosmeticParams {
    fn default() -> Self {
        Self {
            sigma_low: Some(3.0),
            sigma_high: Some(3.0),
            is_cfa: false,
            aggregator_override: None,
            sigma_source: SigmaSource::Statistics,
        }
    }
}

impl CosmeticParams {
    /// Create new parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cold multiplier; [`SIGMA_DISABLED`] disables cold detection
    pub fn with_sigma_low(mut self, sigma: f64) -> Self {
        self.sigma_low = (sigma != SIGMA_DISABLED).then_some(sigma);
        self
    }

    /// Set the hot multiplier; [`SIGMA_DISABLED`] disables hot detection
    pub fn with_sigma_high(mut self, sigma: f64) -> Self {
        self.sigma_high = (sigma != SIGMA_DISABLED).then_some(sigma);
        self
    }

    /// Treat the image as a Bayer mosaic
    pub fn with_cfa(mut self, is_cfa: bool) -> Self {
        self.is_cfa = is_cfa;
        self
    }

    /// Repair every pixel with `aggregator` regardless of its kind
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator_override = Some(aggregator);
        self
    }

    /// Choose the sigma that detection thresholds are scaled by
    pub fn with_sigma_source(mut self, source: SigmaSource) -> Self {
        self.sigma_source = source;
        self
    }

    /// Validated detection thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`](crate::FilterError::InvalidParameters)
    /// for a negative or non-finite multiplier.
    pub fn thresholds(&self) -> FilterResult<Thresholds> {
        Thresholds::new(self.sigma_low, self.sigma_high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = CosmeticParams::default();
        assert_eq!(p.sigma_low, Some(3.0));
        assert_eq!(p.sigma_high, Some(3.0));
        assert!(!p.is_cfa);
        assert_eq!(p.aggregator_override, None);
        assert_eq!(p.sigma_source, SigmaSource::Statistics);
        assert_eq!(p.thresholds().unwrap(), Thresholds::default());
    }

    #[test]
    fn test_invalid_multiplier() {
        let p = CosmeticParams::new().with_sigma_high(-0.5);
        assert!(p.thresholds().is_err());
        let p = CosmeticParams::new().with_sigma_low(SIGMA_DISABLED).with_sigma_high(SIGMA_DISABLED);
        assert!(p.thresholds().unwrap().is_disabled());
    }

    #[test]
    fn test_sigma_source_builder() {
        let p = CosmeticParams::new().with_sigma_source(SigmaSource::Noise3);
        assert_eq!(p.sigma_source, SigmaSource::Noise3);
        assert_eq!(p.sigma_low, Some(3.0));
    }
}
