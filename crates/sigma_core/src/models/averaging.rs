//! Averaging two dispersion regimes.
//!
//! Mixing a low-SD regime with a high-SD regime in proportion `w` gives a
//! mixture whose variance is the weighted mean of the variances. Its SD is the
//! root-mean-square of the two SDs, which is never below the linear blend of
//! the SDs (square root of a mean of squares is convex in the SDs).

use num_traits::Float;

use crate::types::{Result, SigmaError};
use crate::validation::{cast, finite, non_negative};

/// Default spacing of the weight sweep, in percent.
pub const DEFAULT_WEIGHT_STEP_PERCENT: u32 = 5;

/// One row of the weight sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AveragingRow<T> {
    /// Weight of the end regime in whole percent, `0..=100`
    pub weight_percent: u32,
    /// `weight_percent / 100`
    pub weight: T,
    /// Linear interpolation of the SDs
    pub naive_sd: T,
    /// Square root of the linearly interpolated variance
    pub rms_sd: T,
    /// `rms_sd - naive_sd`, never negative; exactly zero at the endpoints
    /// and when both regimes share one SD
    pub gap: T,
}

impl<T> AveragingRow<T> {
    /// Axis label, e.g. `"35%"`.
    pub fn label(&self) -> String {
        format!("{}%", self.weight_percent)
    }
}

/// Sweep weights 0%, 5%, ..., 100% between `start_sd` and `end_sd`.
///
/// See [`compute_with_step`].
pub fn compute<T: Float>(start_sd: T, end_sd: T) -> Result<Vec<AveragingRow<T>>> {
    compute_with_step(start_sd, end_sd, DEFAULT_WEIGHT_STEP_PERCENT)
}

/// Sweep weights `0, step, 2·step, ..., 100` percent between two regimes.
///
/// Returns `100 / step + 1` rows in ascending weight order.
///
/// # Errors
///
/// `SigmaError::InvalidInput` if an SD is negative or non-finite, or if
/// `weight_step_percent` is zero or does not divide 100.
///
/// # Example
///
/// ```
/// use sigma_core::models::averaging;
///
/// let rows = averaging::compute_with_step(10.0_f64, 50.0, 50).unwrap();
/// assert_eq!(rows.len(), 3);
///
/// let mid = &rows[1];
/// assert_eq!(mid.naive_sd, 30.0);
/// assert!((mid.rms_sd - 1300.0_f64.sqrt()).abs() < 1e-12);
/// assert!(mid.gap > 6.0);
/// ```
pub fn compute_with_step<T: Float>(
    start_sd: T,
    end_sd: T,
    weight_step_percent: u32,
) -> Result<Vec<AveragingRow<T>>> {
    let start_sd = non_negative("start_sd", start_sd)?;
    let end_sd = non_negative("end_sd", end_sd)?;
    if weight_step_percent == 0 || 100 % weight_step_percent != 0 {
        return Err(SigmaError::invalid_input(
            "weight_step_percent",
            format!("must be a positive divisor of 100, got {}", weight_step_percent),
        ));
    }

    let hundred: T = cast("weight_percent", 100)?;
    let start_var = finite("start_sd", start_sd * start_sd)?;
    let end_var = finite("end_sd", end_sd * end_sd)?;
    let single_regime = start_sd == end_sd;

    (0..=100)
        .step_by(weight_step_percent as usize)
        .map(|weight_percent: u32| {
            let weight = cast::<T, _>("weight_percent", weight_percent)? / hundred;
            let keep = T::one() - weight;

            let naive_sd = keep * start_sd + weight * end_sd;
            let avg_var = keep * start_var + weight * end_var;
            let rms_sd = avg_var.sqrt();

            // the blends agree exactly here; rounding must not open a gap
            let gap = if single_regime || weight_percent == 0 || weight_percent == 100 {
                T::zero()
            } else {
                (rms_sd - naive_sd).max(T::zero())
            };

            Ok(AveragingRow {
                weight_percent,
                weight,
                naive_sd,
                rms_sd,
                gap,
            })
        })
        .collect()
}

/// Row with the widest RMS-over-linear gap (first one on ties).
pub fn max_gap<T: Float>(rows: &[AveragingRow<T>]) -> Option<&AveragingRow<T>> {
    rows.iter()
        .fold(None, |best: Option<&AveragingRow<T>>, row| match best {
            Some(b) if b.gap >= row.gap => Some(b),
            _ => Some(row),
        })
}

/// Row at the 50% mix, if the sweep contains one.
pub fn midpoint<T>(rows: &[AveragingRow<T>]) -> Option<&AveragingRow<T>> {
    rows.iter().find(|row| row.weight_percent == 50)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_default_sweep_shape() {
        let rows = compute(10.0_f64, 50.0).unwrap();
        assert_eq!(rows.len(), 21);
        assert_eq!(rows[0].weight_percent, 0);
        assert_eq!(rows[20].weight_percent, 100);
        assert_eq!(rows[20].weight, 1.0);
        assert!(rows
            .windows(2)
            .all(|pair| pair[0].weight < pair[1].weight));
    }

    #[test]
    fn test_reference_midpoint() {
        let rows = compute(10.0_f64, 50.0).unwrap();
        let mid = midpoint(&rows).unwrap();
        assert_eq!(mid.label(), "50%");
        assert_relative_eq!(mid.naive_sd, 30.0, epsilon = 1e-12);
        assert_relative_eq!(mid.rms_sd, 1300.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(mid.rms_sd, 36.0555, epsilon = 1e-4);
        assert_relative_eq!(mid.gap, 6.0555, epsilon = 1e-4);
    }

    #[test]
    fn test_endpoints_have_zero_gap() {
        let rows = compute(10.0_f64, 50.0).unwrap();
        let first = rows.first().unwrap();
        let last = rows.last().unwrap();
        assert_eq!(first.naive_sd, 10.0);
        assert_eq!(first.rms_sd, 10.0);
        assert_eq!(first.gap, 0.0);
        assert_eq!(last.naive_sd, 50.0);
        assert_eq!(last.rms_sd, 50.0);
        assert_eq!(last.gap, 0.0);
    }

    #[test]
    fn test_equal_regimes_have_zero_gap() {
        let rows = compute(20.0_f64, 20.0).unwrap();
        for row in &rows {
            assert_eq!(row.gap, 0.0);
        }
    }

    #[test]
    fn test_equal_regimes_gap_exact_at_every_step() {
        // Blending a regime with itself rounds unevenly across fine weights
        let rows = compute_with_step(73.656_f64, 73.656, 1).unwrap();
        assert_eq!(rows.len(), 101);
        for row in &rows {
            assert_eq!(row.gap, 0.0, "weight {}", row.label());
            assert_abs_diff_eq!(row.rms_sd, row.naive_sd, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rejects_variance_overflow() {
        assert!(compute(1e200_f64, 50.0).is_err());
        assert!(compute(10.0_f64, 1e200).is_err());
    }

    #[test]
    fn test_custom_step_lengths() {
        for (step, len) in [(1, 101), (10, 11), (20, 6), (25, 5), (100, 2)] {
            let rows = compute_with_step(5.0_f64, 40.0, step).unwrap();
            assert_eq!(rows.len(), len, "step {}", step);
        }
    }

    #[test]
    fn test_rejects_non_divisor_step() {
        for step in [0, 3, 7, 30, 101] {
            assert!(
                compute_with_step(10.0_f64, 50.0, step).is_err(),
                "step {} should be rejected",
                step
            );
        }
    }

    #[test]
    fn test_rejects_negative_sd() {
        assert!(compute(-10.0_f64, 50.0).is_err());
        assert!(compute(10.0_f64, f64::NAN).is_err());
    }

    #[test]
    fn test_max_gap() {
        let rows = compute(10.0_f64, 50.0).unwrap();
        let widest = max_gap(&rows).unwrap();
        assert!(rows.iter().all(|r| r.gap <= widest.gap));
        assert!(widest.weight_percent > 0 && widest.weight_percent < 100);
        assert!(max_gap::<f64>(&[]).is_none());
    }

    #[test]
    fn test_midpoint_missing_for_coarse_step() {
        let rows = compute_with_step(10.0_f64, 50.0, 25).unwrap();
        assert!(midpoint(&rows).is_some());
        let rows = compute_with_step(10.0_f64, 50.0, 20).unwrap();
        assert!(midpoint(&rows).is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(300))]

            #[test]
            fn test_rms_never_below_linear(start in 0.0..1e3_f64, end in 0.0..1e3_f64) {
                let rows = compute_with_step(start, end, 1).unwrap();
                for row in &rows {
                    prop_assert!(row.gap >= 0.0);
                }
            }

            #[test]
            fn test_single_regime_gap_is_zero(
                sd in 0.0..1e3_f64,
                step in prop::sample::select(vec![1u32, 2, 5, 10]),
            ) {
                let rows = compute_with_step(sd, sd, step).unwrap();
                for row in &rows {
                    prop_assert_eq!(row.gap, 0.0);
                }
            }

            #[test]
            fn test_interior_gap_strict(start in 1.0..100.0_f64, delta in 1.0..100.0_f64) {
                let rows = compute(start, start + delta).unwrap();
                for row in &rows[1..rows.len() - 1] {
                    prop_assert!(row.gap > 0.0);
                }
            }

            #[test]
            fn test_sequence_length(
                step in prop::sample::select(vec![1u32, 2, 4, 5, 10, 20, 25, 50, 100]),
            ) {
                let rows = compute_with_step(10.0_f64, 50.0, step).unwrap();
                prop_assert_eq!(rows.len(), (100 / step + 1) as usize);
            }
        }
    }
}
