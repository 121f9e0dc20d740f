//! Additivity of independent variances.
//!
//! For two independent sources the variances add, so the combined SD is the
//! hypotenuse of a right triangle whose legs are the two SDs. Summing the SDs
//! directly (the naive answer) overstates dispersion whenever both are
//! non-zero.

use num_traits::Float;

use crate::types::{Ratio, Result};
use crate::validation::{cast, finite, non_negative};

/// Combined dispersion of two independent sources.
///
/// Invariants for valid inputs:
/// - `total_variance = variance1 + variance2`
/// - `actual_sd = sqrt(total_variance) <= naive_sd = sd1 + sd2`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdditivityResult<T> {
    /// First input SD
    pub sd1: T,
    /// Second input SD
    pub sd2: T,
    /// `sd1²`
    pub variance1: T,
    /// `sd2²`
    pub variance2: T,
    /// `variance1 + variance2`
    pub total_variance: T,
    /// `sqrt(total_variance)`, the correct combined SD
    pub actual_sd: T,
    /// `sd1 + sd2`, the naive combined SD
    pub naive_sd: T,
    /// How far the naive sum overshoots, in percent of `actual_sd`.
    /// Undefined when both SDs are zero.
    pub error_percent: Ratio<T>,
}

/// Combine two independent SDs.
///
/// # Errors
///
/// `SigmaError::InvalidInput` if either SD is negative or non-finite, or so
/// large that the total variance overflows.
///
/// # Example
///
/// ```
/// use sigma_core::models::additivity;
///
/// let r = additivity::compute(15.0_f64, 20.0).unwrap();
/// assert_eq!(r.variance1, 225.0);
/// assert_eq!(r.variance2, 400.0);
/// assert_eq!(r.actual_sd, 25.0);
/// assert_eq!(r.naive_sd, 35.0);
///
/// // Both zero: the error percentage is reported as undefined, not NaN
/// let zero = additivity::compute(0.0_f64, 0.0).unwrap();
/// assert!(!zero.error_percent.is_defined());
/// ```
pub fn compute<T: Float>(sd1: T, sd2: T) -> Result<AdditivityResult<T>> {
    let sd1 = non_negative("sd1", sd1)?;
    let sd2 = non_negative("sd2", sd2)?;

    let variance1 = sd1 * sd1;
    let variance2 = sd2 * sd2;
    let total_variance = finite("total_variance", variance1 + variance2)?;
    let actual_sd = total_variance.sqrt();
    let naive_sd = sd1 + sd2;
    let hundred: T = cast("percent", 100)?;
    let error_percent = Ratio::of(naive_sd - actual_sd, actual_sd).scale(hundred);

    Ok(AdditivityResult {
        sd1,
        sd2,
        variance1,
        variance2,
        total_variance,
        actual_sd,
        naive_sd,
        error_percent,
    })
}

impl<T: Float> AdditivityResult<T> {
    /// Absolute overstatement of the naive sum, `naive_sd - actual_sd`.
    pub fn overstatement(&self) -> T {
        self.naive_sd - self.actual_sd
    }

    /// Right triangle with legs `sd1` (horizontal) and `sd2` (vertical).
    pub fn triangle(&self) -> RightTriangle<T> {
        RightTriangle::from_legs(self.sd1, self.sd2)
    }

    /// The two bars of the comparison chart: correct combined SD first.
    pub fn comparison(&self) -> [ComparisonBar<T>; 2] {
        [
            ComparisonBar {
                label: "Combined SD",
                value: self.actual_sd,
                verdict: Verdict::Correct,
            },
            ComparisonBar {
                label: "Naive Sum",
                value: self.naive_sd,
                verdict: Verdict::Wrong,
            },
        ]
    }
}

/// A point in SD-unit Cartesian coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    /// Horizontal coordinate
    pub x: T,
    /// Vertical coordinate
    pub y: T,
}

/// Vector-addition picture of two orthogonal SDs.
///
/// The legs run from `origin` to `base` and from `base` to `apex`;
/// the hypotenuse from `origin` to `apex` has length `actual_sd`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RightTriangle<T> {
    /// `(0, 0)`
    pub origin: Point<T>,
    /// `(sd1, 0)`
    pub base: Point<T>,
    /// `(sd1, sd2)`
    pub apex: Point<T>,
}

impl<T: Float> RightTriangle<T> {
    /// Build the triangle for legs `a` (horizontal) and `b` (vertical).
    pub fn from_legs(a: T, b: T) -> Self {
        Self {
            origin: Point {
                x: T::zero(),
                y: T::zero(),
            },
            base: Point { x: a, y: T::zero() },
            apex: Point { x: a, y: b },
        }
    }

    /// Euclidean length from origin to apex.
    pub fn hypotenuse_length(&self) -> T {
        let dx = self.apex.x - self.origin.x;
        let dy = self.apex.y - self.origin.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Lengths of the horizontal and vertical legs.
    pub fn leg_lengths(&self) -> (T, T) {
        (
            (self.base.x - self.origin.x).abs(),
            (self.apex.y - self.base.y).abs(),
        )
    }
}

/// Whether a bar shows the correct or the naive answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verdict {
    /// Variance-based answer
    Correct,
    /// Linear SD answer
    Wrong,
}

/// One bar of the combined-vs-naive comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonBar<T> {
    /// Display label
    pub label: &'static str,
    /// Bar height in SD units
    pub value: T,
    /// Correct or naive
    pub verdict: Verdict,
}
