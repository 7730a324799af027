//! Seeded synthetic test images
//!
//! Every generator is deterministic for a given seed, so regression values
//! computed from these images are stable across runs.

use cosmetica_core::{Pix, Sample};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::error::{TestError, TestResult};

/// Image with every sample equal to `value`.
pub fn flat_field(width: u32, height: u32, value: u16) -> TestResult<Pix<u16>> {
    Ok(Pix::new_filled(width, height, value)?)
}

/// Linear ramp `base + dx * x + dy * y`, rounded and clamped.
pub fn gradient_field(width: u32, height: u32, base: f64, dx: f64, dy: f64) -> TestResult<Pix<u16>> {
    let mut pix = Pix::new(width, height)?;
    let w = width as usize;
    for (i, v) in pix.data_mut().iter_mut().enumerate() {
        let x = (i % w) as f64;
        let y = (i / w) as f64;
        *v = u16::from_f64_round(base + dx * x + dy * y);
    }
    Ok(pix)
}

/// Gaussian noise of standard deviation `sigma` around `mean`.
///
/// Samples come from `Normal(mean, sigma)` driven by a `StdRng` seeded with
/// `seed`, then rounded and clamped to the `u16` range.
///
/// # Errors
///
/// Returns [`TestError::InvalidParameter`] for a negative or non-finite
/// `sigma`.
pub fn noise_field(width: u32, height: u32, mean: f64, sigma: f64, seed: u64) -> TestResult<Pix<u16>> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(TestError::InvalidParameter(format!(
            "sigma must be finite and non-negative, got {}",
            sigma
        )));
    }
    let normal = Normal::new(mean, sigma).map_err(|e| TestError::InvalidParameter(e.to_string()))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pix = Pix::new(width, height)?;
    for v in pix.data_mut() {
        *v = u16::from_f64_round(normal.sample(&mut rng));
    }
    Ok(pix)
}

/// Bayer mosaic where each 2x2 cell holds `[top-left, top-right,
/// bottom-left, bottom-right]` channel levels.
pub fn bayer_field(width: u32, height: u32, levels: [u16; 4]) -> TestResult<Pix<u16>> {
    let mut pix = Pix::new(width, height)?;
    let w = width as usize;
    for (i, v) in pix.data_mut().iter_mut().enumerate() {
        let x = i % w;
        let y = i / w;
        *v = levels[(y % 2) * 2 + (x % 2)];
    }
    Ok(pix)
}

/// Overwrite single samples, e.g. to plant hot or cold pixels.
pub fn plant<T: Sample>(pix: &mut Pix<T>, defects: &[(u32, u32, T)]) -> TestResult<()> {
    for &(x, y, v) in defects {
        pix.set_pixel(x, y, v)?;
    }
    Ok(())
}
