//! cosmetica-filter - Deviant pixel detection and cosmetic correction
//!
//! This crate provides:
//!
//! - Hot/cold pixel detection against global median and sigma thresholds
//! - Pointwise repair from a median (5x5) or mean (3x3) neighborhood
//! - Scanline repair from the rows around a bad row
//! - Batch repair of deviant lists with snapshot semantics
//! - Bayer-aware (CFA) neighborhoods that only mix same-color samples
//! - Thresholds scaled by the image sigma or by the 3rd-order background noise
//!
//! # Usage
//!
//! ```
//! use cosmetica_core::Pix;
//! use cosmetica_filter::{CosmeticParams, auto_correct};
//!
//! let mut pix: Pix<u16> = Pix::new_filled(16, 16, 1000).unwrap();
//! pix.set_pixel(8, 8, 1200).unwrap();
//! pix.set_pixel(3, 3, 800).unwrap();
//!
//! let report = auto_correct(&mut pix.view_mut(), &CosmeticParams::default()).unwrap();
//! assert_eq!((report.hot, report.cold), (1, 1));
//! assert_eq!(pix.get_pixel(8, 8), Some(1000));
//! ```

pub mod correct;
pub mod deviant;
mod error;
pub mod neighborhood;
pub mod params;
pub mod pipeline;

pub use error::{FilterError, FilterResult};

pub use correct::{correct_line, correct_many, correct_point};
pub use deviant::{
    DeviantKind, DeviantPixel, DeviantScan, SIGMA_DISABLED, Thresholds, find_deviants,
    find_deviants_with_stats,
};
pub use neighborhood::{Aggregator, Exclusion, Geometry, MAX_NEIGHBORS, Neighborhood};
pub use params::{CosmeticParams, SigmaSource};
pub use pipeline::{CosmeticReport, Defect, auto_correct, correct_all, correct_defects, detect};
