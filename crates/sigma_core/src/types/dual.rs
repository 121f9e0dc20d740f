//! Dual number type integration for sensitivity checks.
//!
//! Every model is generic over `num_traits::Float`, which num-dual's
//! `Dual64` implements. Seeding one input with a unit derivative yields the
//! model output together with its partial derivative in that input.
//!
//! ## Usage
//!
//! ```
//! use sigma_core::models::additivity;
//! use sigma_core::types::dual::DualNumber;
//!
//! // d(actual_sd)/d(sd1) = sd1 / actual_sd = 15 / 25
//! let sd1 = DualNumber::new(15.0, 1.0);
//! let sd2 = DualNumber::from(20.0);
//!
//! let result = additivity::compute(sd1, sd2).unwrap();
//! assert!((result.actual_sd.re - 25.0).abs() < 1e-12);
//! assert!((result.actual_sd.eps - 0.6).abs() < 1e-12);
//! ```

/// Type alias for num-dual's Dual64 (f64-based dual numbers).
///
/// - `re`: Real part (function value)
/// - `eps`: Dual part (derivative with respect to the seeded input)
#[cfg(feature = "num-dual-mode")]
pub type DualNumber = num_dual::Dual64;
