//! Error types for structured error handling.
//!
//! `SigmaError` covers every failure the numeric core can signal:
//! - `InvalidInput`: a scalar, step or horizon outside the model's domain
//! - `OutOfRange`: a value outside a lesson's presentation range
//! - `UndefinedRatio`: a quotient whose denominator is zero
//! - `UnknownModule`: an unrecognised lesson identifier

use thiserror::Error;

use super::ratio::UndefinedReason;

/// Categorised errors of the numeric core.
///
/// # Examples
/// ```
/// use sigma_core::types::SigmaError;
///
/// let err = SigmaError::invalid_input("sd1", "must be non-negative, got -1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid input for sd1: must be non-negative, got -1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SigmaError {
    /// A supplied value is negative, non-finite or otherwise outside the domain.
    #[error("Invalid input for {parameter}: {reason}")]
    InvalidInput {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Human readable description of the violation
        reason: String,
    },

    /// A value lies outside the range a lesson accepts from its controls.
    #[error("{parameter} = {value} is outside the accepted range [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Supplied value
        value: f64,
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
    },

    /// A ratio was requested whose denominator is zero.
    #[error("Undefined ratio: {0}")]
    UndefinedRatio(UndefinedReason),

    /// Lesson identifier not recognised.
    #[error("Unknown module: {0}. Supported: additivity, averaging, distance, time")]
    UnknownModule(String),
}

impl SigmaError {
    /// Create an invalid input error
    pub fn invalid_input(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }

    /// Returns true when the error stems from a zero denominator.
    pub fn is_undefined_ratio(&self) -> bool {
        matches!(self, SigmaError::UndefinedRatio(_))
    }
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, SigmaError>;
