//! Quotients with an explicit undefined state.
//!
//! Two lesson outputs are ratios whose denominator can vanish: the error
//! percentage of the naive SD sum (when both SDs are zero) and the variance
//! impact ratio (when the shock is zero). [`Ratio`] carries that case as a
//! value so callers can show "N/A" instead of a malformed number.

use std::fmt;

use num_traits::Float;

use super::error::{Result, SigmaError};

/// Why a [`Ratio`] has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UndefinedReason {
    /// The denominator is exactly zero.
    ZeroDenominator,
    /// The quotient overflowed or otherwise left the finite range.
    NonFinite,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedReason::ZeroDenominator => write!(f, "denominator is zero"),
            UndefinedReason::NonFinite => write!(f, "quotient is not finite"),
        }
    }
}

/// A quotient that is either a finite value or explicitly undefined.
///
/// `Display` honours the formatter precision for defined values and renders
/// undefined ones as `N/A`. Width is not applied; pad the rendered string.
///
/// # Examples
/// ```
/// use sigma_core::types::{Ratio, UndefinedReason};
///
/// let r = Ratio::of(425.0_f64, 125.0);
/// assert_eq!(r.value(), Some(3.4));
/// assert_eq!(format!("{:.2}", r), "3.40");
///
/// let undefined = Ratio::of(1.0_f64, 0.0);
/// assert_eq!(undefined, Ratio::Undefined(UndefinedReason::ZeroDenominator));
/// assert_eq!(format!("{:.2}", undefined), "N/A");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Ratio<T> {
    /// Finite quotient.
    Defined(T),
    /// No meaningful quotient exists.
    Undefined(UndefinedReason),
}

impl<T: Float> Ratio<T> {
    /// Divide `numerator` by `denominator`, flagging zero and non-finite cases.
    pub fn of(numerator: T, denominator: T) -> Self {
        if denominator == T::zero() {
            return Ratio::Undefined(UndefinedReason::ZeroDenominator);
        }
        let quotient = numerator / denominator;
        if quotient.is_finite() {
            Ratio::Defined(quotient)
        } else {
            Ratio::Undefined(UndefinedReason::NonFinite)
        }
    }

    /// Scale a defined ratio, leaving undefined ones untouched.
    pub fn scale(self, factor: T) -> Self {
        self.map(|v| v * factor)
    }
}

impl<T> Ratio<T> {
    /// Returns the quotient if it is defined.
    pub fn value(self) -> Option<T> {
        match self {
            Ratio::Defined(v) => Some(v),
            Ratio::Undefined(_) => None,
        }
    }

    /// Returns true if the quotient is defined.
    pub fn is_defined(&self) -> bool {
        matches!(self, Ratio::Defined(_))
    }

    /// Converts into a `Result`, mapping the undefined case to
    /// [`SigmaError::UndefinedRatio`].
    pub fn into_result(self) -> Result<T> {
        match self {
            Ratio::Defined(v) => Ok(v),
            Ratio::Undefined(reason) => Err(SigmaError::UndefinedRatio(reason)),
        }
    }

    /// Apply `f` to a defined value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Ratio<U> {
        match self {
            Ratio::Defined(v) => Ratio::Defined(f(v)),
            Ratio::Undefined(reason) => Ratio::Undefined(reason),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Ratio<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Defined(v) => match f.precision() {
                Some(precision) => write!(f, "{:.*}", precision, v),
                None => write!(f, "{}", v),
            },
            Ratio::Undefined(_) => write!(f, "N/A"),
        }
    }
}
