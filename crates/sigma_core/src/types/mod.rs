//! Core error, ratio and numeric types.
//!
//! This module provides:
//! - `error`: `SigmaError`, the single error type of the numeric core
//! - `ratio`: `Ratio`, a quotient that reports a zero denominator explicitly
//! - `dual`: Dual number alias for sensitivity checks (when `num-dual-mode` is enabled)
//!
//! # Re-exports
//!
//! - [`SigmaError`] and [`Result`] from `error`
//! - [`Ratio`] and [`UndefinedReason`] from `ratio`

#[cfg(feature = "num-dual-mode")]
pub mod dual;
pub mod error;
pub mod ratio;

pub use error::{Result, SigmaError};
pub use ratio::{Ratio, UndefinedReason};
