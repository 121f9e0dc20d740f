//! The four lesson models.
//!
//! Each submodule is an independent set of pure functions from scalar inputs
//! to plottable records:
//! - [`additivity`]: combined SD of two independent sources vs the naive sum
//! - [`averaging`]: linear vs RMS interpolation between two regimes
//! - [`distance`]: variance impact of the same SD shock at two baselines
//! - [`time_scaling`]: linear vs square-root-of-time horizon scaling
//!
//! All functions validate their inputs and return [`crate::types::Result`].

pub mod additivity;
pub mod averaging;
pub mod distance;
pub mod time_scaling;

pub use additivity::{AdditivityResult, ComparisonBar, Point, RightTriangle, Verdict};
pub use averaging::AveragingRow;
pub use distance::{DistanceResult, VarianceCurvePoint};
pub use time_scaling::TimeScalingRow;
