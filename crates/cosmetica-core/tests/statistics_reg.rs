//! Image statistics regression test
//!
//! Tests global statistics over synthetic frames, selections, and the
//! robust location/scale estimators.

use cosmetica_core::{Box, PixView, StatsRequest};
use cosmetica_test::{RegParams, synthetic};

#[test]
fn statistics_reg_gaussian() {
    let mut rp = RegParams::new("statistics_gaussian");

    let pix = synthetic::noise_field(100, 100, 3000.0, 25.0, 11).unwrap();
    let s = pix.statistics(None, StatsRequest::ALL).unwrap();

    rp.compare_values(10000.0, s.count as f64, 0.0);
    rp.compare_values(3000.0, s.mean, 1.0);
    rp.compare_values(3000.0, s.median, 2.0);
    rp.compare_values(25.0, s.sigma, 1.0);
    // For a normal distribution MAD = 0.6745 sigma, mean |x - m| = 0.7979 sigma.
    rp.compare_values(0.6745 * 25.0, s.mad, 1.0);
    rp.compare_values(0.7979 * 25.0, s.avg_dev, 1.0);
    rp.compare_values(25.0, s.sqrt_bwmv, 1.5);
    rp.compare_values(3000.0, s.location, 2.0);
    rp.compare_values(25.0, s.scale, 2.0);
    rp.compare_values(65535.0, s.norm_value, 0.0);
    rp.compare_values(1.0, if s.min < s.median && s.median < s.max { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn statistics_reg_robust_against_outliers() {
    let mut rp = RegParams::new("statistics_outliers");

    let mut pix = synthetic::noise_field(80, 80, 1500.0, 10.0, 3).unwrap();
    let clean = pix.statistics(None, StatsRequest::ALL).unwrap();
    let defects: Vec<(u32, u32, u16)> = (0..60).map(|i| ((i * 13) % 80, (i * 29) % 80, 65535)).collect();
    synthetic::plant(&mut pix, &defects).unwrap();
    let dirty = pix.statistics(None, StatsRequest::ALL).unwrap();

    // The sigma explodes, the robust scales do not.
    rp.compare_values(1.0, if dirty.sigma > 10.0 * clean.sigma { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(clean.median, dirty.median, 1.0);
    rp.compare_values(clean.mad, dirty.mad, 1.0);
    rp.compare_values(clean.sqrt_bwmv, dirty.sqrt_bwmv, 1.0);
    rp.compare_values(clean.scale, dirty.scale, 1.0);
    rp.compare_values(65535.0, dirty.max, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn statistics_reg_selection() {
    let mut rp = RegParams::new("statistics_selection");

    let pix = synthetic::gradient_field(20, 10, 0.0, 1.0, 100.0).unwrap();
    let view = PixView::new(pix.data(), 20, 10).unwrap();

    // Rows 2..4, columns 5..9: values 205..209 and 305..309.
    let sel = Box::new(5, 2, 5, 2).unwrap();
    let s = view.statistics(Some(&sel), StatsRequest::BASIC).unwrap();
    rp.compare_values(10.0, s.count as f64, 0.0);
    rp.compare_values(257.0, s.mean, 1e-9);
    rp.compare_values(305.0, s.median, 0.0);
    rp.compare_values(205.0, s.min, 0.0);
    rp.compare_values(309.0, s.max, 0.0);

    // A selection hanging over the edge is clipped.
    let edge = Box::new(18, 8, 10, 10).unwrap();
    let s = view.statistics(Some(&edge), StatsRequest::MIN_MAX).unwrap();
    rp.compare_values(4.0, s.count as f64, 0.0);
    rp.compare_values(818.0, s.min, 0.0);
    rp.compare_values(919.0, s.max, 0.0);

    assert!(view.statistics(Some(&Box::new_unchecked(30, 0, 4, 4)), StatsRequest::MEAN).is_err());

    assert!(rp.cleanup());
}
