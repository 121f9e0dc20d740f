//! Sensitivities of the lesson models via dual numbers.
//!
//! Seeding an input with a unit derivative and reading `eps` off the output
//! gives the partial derivative, which is compared against the closed form.

#![cfg(feature = "num-dual-mode")]

use approx::assert_relative_eq;
use sigma_core::models::{additivity, averaging, distance, time_scaling};
use sigma_core::types::dual::DualNumber;

/// d sqrt(a² + b²) / da = a / sqrt(a² + b²)
#[test]
fn test_additivity_actual_sd_gradient() {
    let sd1 = DualNumber::new(15.0, 1.0);
    let sd2 = DualNumber::from(20.0);

    let r = additivity::compute(sd1, sd2).unwrap();
    assert_relative_eq!(r.actual_sd.re, 25.0, epsilon = 1e-12);
    assert_relative_eq!(r.actual_sd.eps, 15.0 / 25.0, epsilon = 1e-12);

    // naive sum moves one-for-one
    assert_relative_eq!(r.naive_sd.eps, 1.0, epsilon = 1e-12);
}

/// d rms / d end at weight w is w · end / rms
#[test]
fn test_averaging_rms_gradient() {
    let start = DualNumber::from(10.0);
    let end = DualNumber::new(50.0, 1.0);

    let rows = averaging::compute_with_step(start, end, 50).unwrap();
    let mid = &rows[1];
    let rms = 1300.0_f64.sqrt();

    assert_relative_eq!(mid.rms_sd.re, rms, epsilon = 1e-12);
    assert_relative_eq!(mid.rms_sd.eps, 0.5 * 50.0 / rms, epsilon = 1e-12);
    assert_relative_eq!(mid.naive_sd.eps, 0.5, epsilon = 1e-12);
}

/// d ((b + s)² - b²) / ds = 2(b + s)
#[test]
fn test_distance_delta_gradient() {
    let shock = DualNumber::new(5.0, 1.0);
    let r = distance::compute(DualNumber::from(10.0), DualNumber::from(40.0), shock).unwrap();

    assert_relative_eq!(r.variance_delta_low.eps, 2.0 * 15.0, epsilon = 1e-12);
    assert_relative_eq!(r.variance_delta_high.eps, 2.0 * 45.0, epsilon = 1e-12);

    // ratio = (2·40·s + s²) / (2·10·s + s²) = (80 + s) / (20 + s)
    // d/ds = (20 - 80) / (20 + s)² = -60 / 625
    let ratio = r.impact_ratio.value().unwrap();
    assert_relative_eq!(ratio.re, 3.4, epsilon = 1e-12);
    assert_relative_eq!(ratio.eps, -60.0 / 625.0, epsilon = 1e-12);
}

/// d (daily · √h) / d daily = √h
#[test]
fn test_time_scaling_gradient() {
    let daily = DualNumber::new(1.0, 1.0);
    let rows = time_scaling::compute(daily).unwrap();

    for row in &rows {
        let h = row.horizon_days as f64;
        assert_relative_eq!(row.actual_sd.eps, h.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(row.naive_sd.eps, h, epsilon = 1e-12);
        // d (daily² · h) / d daily = 2 · daily · h
        assert_relative_eq!(row.cumulative_variance.eps, 2.0 * h, epsilon = 1e-9);
    }
}
