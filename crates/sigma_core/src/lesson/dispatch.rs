//! One entry point over the four models.
//!
//! [`LessonInput`] is a tagged variant carrying the inputs of exactly one
//! lesson; [`LessonInput::evaluate`] runs the matching model and wraps its
//! records in a [`LessonOutput`]. Dispatch is static (enum match).

use super::catalog::ModuleId;
use super::ranges::{Adjustment, RangePolicy};
use crate::models::averaging::DEFAULT_WEIGHT_STEP_PERCENT;
use crate::models::distance::{DEFAULT_CURVE_MARGIN, DEFAULT_CURVE_STEP};
use crate::models::time_scaling::DEFAULT_HORIZONS;
use crate::models::{
    additivity, averaging, distance, time_scaling, AdditivityResult, AveragingRow,
    DistanceResult, TimeScalingRow, VarianceCurvePoint,
};
use crate::types::{Result, SigmaError};

/// Inputs of a single lesson.
///
/// # Examples
/// ```
/// use sigma_core::lesson::{LessonInput, LessonOutput, ModuleId};
///
/// let input = LessonInput::defaults(ModuleId::Distance);
/// match input.evaluate().unwrap() {
///     LessonOutput::Distance { result, curve } => {
///         assert_eq!(result.impact_ratio.value(), Some(3.4));
///         assert_eq!(curve.len(), 56);
///     }
///     other => panic!("unexpected output {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "module", rename_all = "lowercase"))]
pub enum LessonInput {
    /// Two independent SDs
    Additivity {
        /// First SD
        sd1: f64,
        /// Second SD
        sd2: f64,
    },
    /// Two regime SDs and the weight sweep spacing
    Averaging {
        /// SD at weight 0
        start_sd: f64,
        /// SD at weight 1
        end_sd: f64,
        /// Sweep spacing in percent
        #[cfg_attr(feature = "serde", serde(default = "default_weight_step"))]
        weight_step_percent: u32,
    },
    /// Two baselines, a shock and the curve sampling
    Distance {
        /// Low regime baseline SD
        low_baseline: f64,
        /// High regime baseline SD
        high_baseline: f64,
        /// SD shock applied to both
        shock: f64,
        /// Curve extends this far past the larger shocked SD
        #[cfg_attr(feature = "serde", serde(default = "default_curve_margin"))]
        curve_margin: f64,
        /// Curve sample spacing
        #[cfg_attr(feature = "serde", serde(default = "default_curve_step"))]
        curve_step: f64,
    },
    /// Daily SD and the horizons to scale to
    Time {
        /// One-day SD
        daily_sd: f64,
        /// Strictly ascending horizons in days
        #[cfg_attr(feature = "serde", serde(default = "default_horizons"))]
        horizons: Vec<u32>,
    },
}

#[cfg(feature = "serde")]
fn default_weight_step() -> u32 {
    DEFAULT_WEIGHT_STEP_PERCENT
}

#[cfg(feature = "serde")]
fn default_curve_margin() -> f64 {
    DEFAULT_CURVE_MARGIN
}

#[cfg(feature = "serde")]
fn default_curve_step() -> f64 {
    DEFAULT_CURVE_STEP
}

#[cfg(feature = "serde")]
fn default_horizons() -> Vec<u32> {
    DEFAULT_HORIZONS.to_vec()
}

/// Records produced by one lesson.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "module", content = "output", rename_all = "lowercase")
)]
pub enum LessonOutput {
    /// Combined vs naive SD
    Additivity(AdditivityResult<f64>),
    /// Weight sweep rows
    Averaging(Vec<AveragingRow<f64>>),
    /// Shock comparison and the parabola to plot it on
    Distance {
        /// Variance deltas and impact ratio
        result: DistanceResult<f64>,
        /// Samples of `variance = sd²`
        curve: Vec<VarianceCurvePoint<f64>>,
    },
    /// Horizon rows
    Time(Vec<TimeScalingRow<f64>>),
}

impl LessonInput {
    /// Initial inputs of a lesson.
    pub fn defaults(module: ModuleId) -> Self {
        let initial = |name: &str| {
            module
                .parameter(name)
                .map(|spec| spec.range.default)
                .unwrap_or_default()
        };
        match module {
            ModuleId::Additivity => LessonInput::Additivity {
                sd1: initial("sd1"),
                sd2: initial("sd2"),
            },
            ModuleId::Averaging => LessonInput::Averaging {
                start_sd: initial("start_sd"),
                end_sd: initial("end_sd"),
                weight_step_percent: DEFAULT_WEIGHT_STEP_PERCENT,
            },
            ModuleId::Distance => LessonInput::Distance {
                low_baseline: initial("low_baseline"),
                high_baseline: initial("high_baseline"),
                shock: initial("shock"),
                curve_margin: DEFAULT_CURVE_MARGIN,
                curve_step: DEFAULT_CURVE_STEP,
            },
            ModuleId::Time => LessonInput::Time {
                daily_sd: initial("daily_sd"),
                horizons: DEFAULT_HORIZONS.to_vec(),
            },
        }
    }

    /// Which lesson these inputs belong to.
    pub fn module(&self) -> ModuleId {
        match self {
            LessonInput::Additivity { .. } => ModuleId::Additivity,
            LessonInput::Averaging { .. } => ModuleId::Averaging,
            LessonInput::Distance { .. } => ModuleId::Distance,
            LessonInput::Time { .. } => ModuleId::Time,
        }
    }

    /// Range-checked control values as `(parameter, value)`, in display order.
    pub fn controls(&self) -> Vec<(&'static str, f64)> {
        match self {
            LessonInput::Additivity { sd1, sd2 } => vec![("sd1", *sd1), ("sd2", *sd2)],
            LessonInput::Averaging {
                start_sd, end_sd, ..
            } => vec![("start_sd", *start_sd), ("end_sd", *end_sd)],
            LessonInput::Distance {
                low_baseline,
                high_baseline,
                shock,
                ..
            } => vec![
                ("low_baseline", *low_baseline),
                ("high_baseline", *high_baseline),
                ("shock", *shock),
            ],
            LessonInput::Time { daily_sd, .. } => vec![("daily_sd", *daily_sd)],
        }
    }

    fn controls_mut(&mut self) -> Vec<(&'static str, &mut f64)> {
        match self {
            LessonInput::Additivity { sd1, sd2 } => vec![("sd1", sd1), ("sd2", sd2)],
            LessonInput::Averaging {
                start_sd, end_sd, ..
            } => vec![("start_sd", start_sd), ("end_sd", end_sd)],
            LessonInput::Distance {
                low_baseline,
                high_baseline,
                shock,
                ..
            } => vec![
                ("low_baseline", low_baseline),
                ("high_baseline", high_baseline),
                ("shock", shock),
            ],
            LessonInput::Time { daily_sd, .. } => vec![("daily_sd", daily_sd)],
        }
    }

    /// Bring every control value into its lesson's range.
    ///
    /// Under [`RangePolicy::Reject`] the first out-of-range value fails with
    /// `SigmaError::OutOfRange`; under [`RangePolicy::Clamp`] values are moved
    /// to the nearest bound and each move is reported.
    pub fn conform(mut self, policy: RangePolicy) -> Result<(Self, Vec<Adjustment>)> {
        let module = self.module();
        let mut adjustments = Vec::new();
        for (name, value) in self.controls_mut() {
            let spec = module.parameter(name).ok_or_else(|| {
                SigmaError::invalid_input(name, format!("no range defined for {}", module))
            })?;
            let (conformed, adjustment) = spec.range.conform(spec.name, *value, policy)?;
            *value = conformed;
            adjustments.extend(adjustment);
        }
        Ok((self, adjustments))
    }

    /// Run the lesson's model.
    ///
    /// # Errors
    ///
    /// Propagates the model's `SigmaError::InvalidInput`.
    pub fn evaluate(&self) -> Result<LessonOutput> {
        match self {
            LessonInput::Additivity { sd1, sd2 } => {
                additivity::compute(*sd1, *sd2).map(LessonOutput::Additivity)
            }
            LessonInput::Averaging {
                start_sd,
                end_sd,
                weight_step_percent,
            } => averaging::compute_with_step(*start_sd, *end_sd, *weight_step_percent)
                .map(LessonOutput::Averaging),
            LessonInput::Distance {
                low_baseline,
                high_baseline,
                shock,
                curve_margin,
                curve_step,
            } => {
                let result = distance::compute(*low_baseline, *high_baseline, *shock)?;
                let margin = crate::validation::non_negative("curve_margin", *curve_margin)?;
                let curve = distance::curve_with_step(result.curve_domain(margin), *curve_step)?;
                Ok(LessonOutput::Distance { result, curve })
            }
            LessonInput::Time { daily_sd, horizons } => {
                time_scaling::compute_with_horizons(*daily_sd, horizons).map(LessonOutput::Time)
            }
        }
    }
}

impl LessonOutput {
    /// Which lesson produced these records.
    pub fn module(&self) -> ModuleId {
        match self {
            LessonOutput::Additivity(_) => ModuleId::Additivity,
            LessonOutput::Averaging(_) => ModuleId::Averaging,
            LessonOutput::Distance { .. } => ModuleId::Distance,
            LessonOutput::Time(_) => ModuleId::Time,
        }
    }
}
