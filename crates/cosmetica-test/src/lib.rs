//! cosmetica-test - Regression test framework for cosmetica
//!
//! Provides the [`RegParams`] harness used by the `tests/*_reg.rs` files of
//! every crate, plus seeded synthetic images in [`synthetic`]. Two modes are
//! supported:
//!
//! - **Compare**: Check every value and report failures (default)
//! - **Display**: Same checks, plus a line per comparison on stderr
//!
//! # Usage
//!
//! ```ignore
//! use cosmetica_test::{RegParams, synthetic};
//!
//! let mut rp = RegParams::new("noise");
//! let pix = synthetic::noise_field(64, 64, 1000.0, 10.0, 7).unwrap();
//! rp.compare_values(10.0, estimate, 1.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
