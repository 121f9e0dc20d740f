//! Lesson catalog, control ranges and unified dispatch.
//!
//! - `catalog`: [`ModuleId`] and the static [`LessonInfo`] table
//! - `ranges`: [`InputRange`] and the per-lesson [`ParameterSpec`] tables
//! - `dispatch`: [`LessonInput`] / [`LessonOutput`], one entry point for all models

pub mod catalog;
pub mod dispatch;
pub mod ranges;

pub use catalog::{LessonInfo, ModuleId, CATALOG};
pub use dispatch::{LessonInput, LessonOutput};
pub use ranges::{Adjustment, InputRange, ParameterSpec, RangePolicy};
