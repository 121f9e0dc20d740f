//! # sigma_core: Closed-form Lessons on Standard Deviation
//!
//! ## Layer 1 (Foundation) Role
//!
//! sigma_core is the numeric kernel behind the SD intuition lessons. It maps a
//! handful of scalar inputs to the records a presentation layer plots:
//! - Additivity of independent variances (`models::additivity`)
//! - Convexity of SD under averaging (`models::averaging`)
//! - Non-linear variance impact of equal SD shocks (`models::distance`)
//! - Square-root-of-time scaling (`models::time_scaling`)
//! - Lesson catalog, input ranges and a unified dispatch (`lesson`)
//! - Error and ratio types: `SigmaError`, `Ratio` (`types`)
//!
//! ## Purity
//!
//! Every operation is a pure function of its arguments. There is no shared
//! state, no I/O and no logging here; recomputing on every input change is
//! the intended refresh model.
//!
//! ## Generic Numerics
//!
//! Models are generic over `num_traits::Float`, so `f32`, `f64` and dual
//! numbers (`num-dual-mode`) flow through the same code paths.
//!
//! ## Usage Examples
//!
//! ```rust
//! use sigma_core::models::{additivity, time_scaling};
//!
//! let result = additivity::compute(15.0_f64, 20.0).unwrap();
//! assert_eq!(result.total_variance, 625.0);
//! assert_eq!(result.actual_sd, 25.0);
//! assert_eq!(result.naive_sd, 35.0);
//! assert!((result.error_percent.value().unwrap() - 40.0).abs() < 1e-12);
//!
//! let rows = time_scaling::compute(1.0_f64).unwrap();
//! assert_eq!(rows.last().unwrap().naive_sd, 252.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): Dual number alias for sensitivity checks
//! - `serde` (default): Serialisation for inputs and result records

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod lesson;
pub mod models;
pub mod types;

pub(crate) mod validation;

pub use lesson::{LessonInput, LessonOutput, ModuleId};
pub use types::{Ratio, SigmaError, UndefinedReason};
