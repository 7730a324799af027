//! cosmetica-stats - Robust statistics estimators
//!
//! This crate provides the estimators that feed deviant pixel detection:
//!
//! - [`mean_sigma`] - Mean and RMS sigma with null-value exclusion
//! - [`noise_order1`] - Background noise from clipped 1st-order differences
//! - [`noise_order3`] - Background noise from 3rd-order differences
//! - [`quick_select`] / [`quick_select_copy`] - Lower median selection
//! - [`img_stats`] - Combined entry point
//!
//! All estimators are pure: they never modify the caller's data, and any
//! scratch they need is allocated per call.

mod error;
pub mod img_stats;
pub mod mean_sigma;
pub mod noise;
pub mod select;

pub use error::{StatsError, StatsResult};
pub use img_stats::{ImgStats, NoiseRequest, img_stats};
pub use mean_sigma::{MeanSigma, mean_sigma};
pub use noise::{Noise3, noise_order1, noise_order3};
pub use select::{quick_select, quick_select_copy};
