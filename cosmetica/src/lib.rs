//! Cosmetica - Cosmetic correction of astronomical frames
//!
//! Finds pixels whose value deviates abnormally from the rest of the frame
//! ("hot" and "cold" pixels left by sensor defects or cosmic-ray hits) and
//! repairs them in place from their neighborhood.
//!
//! # Overview
//!
//! - Single-channel pixel buffers and global image statistics
//! - Robust mean/sigma and background noise estimators
//! - Hot/cold pixel detection with independent thresholds
//! - Median and mean repair, pointwise or per scanline, Bayer-aware
//!
//! # Example
//!
//! ```
//! use cosmetica::Pix;
//! use cosmetica::filter::{CosmeticParams, auto_correct};
//!
//! let mut pix: Pix<u16> = Pix::new_filled(32, 32, 500).unwrap();
//! pix.set_pixel(16, 16, 9000).unwrap();
//!
//! let params = CosmeticParams::new().with_sigma_low(-1.0);
//! let report = auto_correct(&mut pix.view_mut(), &params).unwrap();
//! assert_eq!(report.hot, 1);
//! assert_eq!(pix.get_pixel(16, 16), Some(500));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use cosmetica_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use cosmetica_filter as filter;
pub use cosmetica_stats as stats;
