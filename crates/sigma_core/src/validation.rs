//! Domain checks shared by the models.
//!
//! The core rejects out-of-domain values; it never clamps or coerces them.

use num_traits::{Float, NumCast, ToPrimitive};

use crate::types::{Result, SigmaError};

/// Require a finite, non-negative standard deviation (or shock, or domain bound).
pub(crate) fn non_negative<T: Float>(parameter: &'static str, value: T) -> Result<T> {
    if !value.is_finite() {
        return Err(SigmaError::invalid_input(
            parameter,
            format!("must be finite, got {}", describe(value)),
        ));
    }
    if value < T::zero() {
        return Err(SigmaError::invalid_input(
            parameter,
            format!("must be non-negative, got {}", describe(value)),
        ));
    }
    Ok(value)
}

/// Require a finite, strictly positive value.
pub(crate) fn positive<T: Float>(parameter: &'static str, value: T) -> Result<T> {
    non_negative(parameter, value)?;
    if value == T::zero() {
        return Err(SigmaError::invalid_input(parameter, "must be positive, got 0"));
    }
    Ok(value)
}

/// Require a derived quantity to have stayed finite.
pub(crate) fn finite<T: Float>(parameter: &'static str, value: T) -> Result<T> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SigmaError::invalid_input(
            parameter,
            "inputs too large: derived variance is not finite",
        ))
    }
}

/// Convert a primitive into the model's float type.
pub(crate) fn cast<T: Float, N: ToPrimitive + Copy>(
    parameter: &'static str,
    value: N,
) -> Result<T> {
    <T as NumCast>::from(value).ok_or_else(|| {
        SigmaError::invalid_input(parameter, "not representable in the floating-point type")
    })
}

fn describe<T: Float>(value: T) -> String {
    match value.to_f64() {
        Some(v) => v.to_string(),
        None => "an unrepresentable value".to_string(),
    }
}
