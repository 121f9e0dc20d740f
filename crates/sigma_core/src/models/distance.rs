//! Variance impact of an SD shock at two baselines.
//!
//! Because variance is the square of SD, the same additive SD shock adds far
//! more variance at a high baseline than at a low one:
//! `(b + s)² - b² = 2bs + s²` grows linearly in the baseline `b`.

use num_traits::Float;

use crate::types::{Ratio, Result, SigmaError};
use crate::validation::{cast, finite, non_negative, positive};

/// Margin added past the larger shocked SD when sizing the curve.
pub const DEFAULT_CURVE_MARGIN: f64 = 10.0;

/// Default spacing of the variance curve, in SD units.
pub const DEFAULT_CURVE_STEP: f64 = 1.0;

/// Upper bound on the number of sampled curve points.
pub const MAX_CURVE_POINTS: usize = 100_000;

/// The same shock applied to a low and a high baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceResult<T> {
    /// SD shock added to both baselines
    pub shock: T,
    /// Low baseline SD
    pub low_start: T,
    /// `low_start + shock`
    pub low_end: T,
    /// High baseline SD
    pub high_start: T,
    /// `high_start + shock`
    pub high_end: T,
    /// `low_end² - low_start²`
    pub variance_delta_low: T,
    /// `high_end² - high_start²`
    pub variance_delta_high: T,
    /// `variance_delta_high / variance_delta_low`; undefined for a zero shock
    pub impact_ratio: Ratio<T>,
}

/// A sample of the parabola `variance = sd²`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarianceCurvePoint<T> {
    /// Standard deviation
    pub sd: T,
    /// `sd²`
    pub variance: T,
}

/// Apply `shock` to both baselines and compare the variance increments.
///
/// `low_baseline < high_baseline` is the intended usage; the arithmetic holds
/// for any ordering.
///
/// # Errors
///
/// `SigmaError::InvalidInput` if any argument is negative or non-finite, or
/// so large that a squared SD overflows.
///
/// # Example
///
/// ```
/// use sigma_core::models::distance;
///
/// let r = distance::compute(10.0_f64, 40.0, 5.0).unwrap();
/// assert_eq!(r.variance_delta_low, 125.0);
/// assert_eq!(r.variance_delta_high, 425.0);
/// assert_eq!(r.impact_ratio.value(), Some(3.4));
/// ```
pub fn compute<T: Float>(
    low_baseline: T,
    high_baseline: T,
    shock: T,
) -> Result<DistanceResult<T>> {
    let low_start = non_negative("low_baseline", low_baseline)?;
    let high_start = non_negative("high_baseline", high_baseline)?;
    let shock = non_negative("shock", shock)?;

    let low_end = low_start + shock;
    let high_end = high_start + shock;
    let variance_delta_low = finite(
        "variance_delta_low",
        low_end * low_end - low_start * low_start,
    )?;
    let variance_delta_high = finite(
        "variance_delta_high",
        high_end * high_end - high_start * high_start,
    )?;

    Ok(DistanceResult {
        shock,
        low_start,
        low_end,
        high_start,
        high_end,
        variance_delta_low,
        variance_delta_high,
        impact_ratio: Ratio::of(variance_delta_high, variance_delta_low),
    })
}

impl<T: Float> DistanceResult<T> {
    /// Curve domain covering both shocked SDs plus `margin`.
    pub fn curve_domain(&self, margin: T) -> T {
        self.low_end.max(self.high_end) + margin
    }
}

/// Sample `variance = sd²` on `[0, max_domain]` with unit spacing.
pub fn curve<T: Float>(max_domain: T) -> Result<Vec<VarianceCurvePoint<T>>> {
    curve_with_step(max_domain, cast("step_size", DEFAULT_CURVE_STEP)?)
}

/// Sample `variance = sd²` at `0, step, 2·step, ...` up to `max_domain`.
///
/// Produces `floor(max_domain / step_size) + 1` points.
///
/// # Errors
///
/// `SigmaError::InvalidInput` if `max_domain` is negative or non-finite, if
/// `step_size` is not strictly positive, or if more than
/// [`MAX_CURVE_POINTS`] points would be produced.
///
/// # Example
///
/// ```
/// use sigma_core::models::distance;
///
/// let points = distance::curve_with_step(10.0_f64, 2.5).unwrap();
/// assert_eq!(points.len(), 5);
/// assert_eq!(points[4].sd, 10.0);
/// assert_eq!(points[4].variance, 100.0);
/// ```
pub fn curve_with_step<T: Float>(
    max_domain: T,
    step_size: T,
) -> Result<Vec<VarianceCurvePoint<T>>> {
    let max_domain = non_negative("max_domain", max_domain)?;
    let step_size = positive("step_size", step_size)?;

    let intervals = (max_domain / step_size)
        .floor()
        .to_usize()
        .filter(|&n| n < MAX_CURVE_POINTS)
        .ok_or_else(|| {
            SigmaError::invalid_input(
                "step_size",
                format!("curve would exceed {} points", MAX_CURVE_POINTS),
            )
        })?;

    (0..=intervals)
        .map(|k| {
            let sd = cast::<T, _>("step_size", k)? * step_size;
            Ok(VarianceCurvePoint {
                sd,
                variance: finite("max_domain", sd * sd)?,
            })
        })
        .collect()
}
