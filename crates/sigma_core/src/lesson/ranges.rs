//! Accepted ranges and initial values for each lesson's controls.
//!
//! The models accept any finite, non-negative input. A front end narrows that
//! to the ranges below before calling them, either rejecting or clamping
//! values that fall outside.

use super::catalog::ModuleId;
use crate::types::{Result, SigmaError};

/// Closed interval with a control step and an initial value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
    /// Control increment
    pub step: f64,
    /// Initial value
    pub default: f64,
}

impl InputRange {
    /// Range with unit step.
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            step: 1.0,
            default,
        }
    }

    /// Same range with a different step.
    pub const fn with_step(self, step: f64) -> Self {
        Self { step, ..self }
    }

    /// Returns true if `value` lies in `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Nearest value inside the range.
    ///
    /// # Errors
    ///
    /// `SigmaError::InvalidInput` for NaN, which has no nearest value.
    pub fn clamp(&self, parameter: &'static str, value: f64) -> Result<f64> {
        if value.is_nan() {
            return Err(SigmaError::invalid_input(parameter, "must be a number, got NaN"));
        }
        Ok(value.clamp(self.min, self.max))
    }

    /// Pass `value` through if it lies inside the range.
    ///
    /// # Errors
    ///
    /// `SigmaError::OutOfRange` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use sigma_core::lesson::InputRange;
    ///
    /// let range = InputRange::new(5.0, 50.0, 15.0);
    /// assert_eq!(range.check("sd1", 20.0), Ok(20.0));
    /// assert!(range.check("sd1", 60.0).is_err());
    /// ```
    pub fn check(&self, parameter: &'static str, value: f64) -> Result<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(SigmaError::OutOfRange {
                parameter,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Decimal places a control with this step displays.
    pub fn decimals(&self) -> usize {
        if self.step < 1.0 {
            1
        } else {
            0
        }
    }
}

/// What to do with a value outside its accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RangePolicy {
    /// Fail with `SigmaError::OutOfRange`
    #[default]
    Reject,
    /// Move the value to the nearest bound
    Clamp,
}

/// A value moved into range under [`RangePolicy::Clamp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    /// Parameter name
    pub parameter: &'static str,
    /// Value as supplied
    pub from: f64,
    /// Value after clamping
    pub to: f64,
}

impl InputRange {
    /// Apply `policy` to `value`, reporting any adjustment made.
    pub fn conform(
        &self,
        parameter: &'static str,
        value: f64,
        policy: RangePolicy,
    ) -> Result<(f64, Option<Adjustment>)> {
        match policy {
            RangePolicy::Reject => self.check(parameter, value).map(|v| (v, None)),
            RangePolicy::Clamp => {
                let to = self.clamp(parameter, value)?;
                let adjustment = (to != value).then_some(Adjustment {
                    parameter,
                    from: value,
                    to,
                });
                Ok((to, adjustment))
            }
        }
    }
}

/// A named lesson input together with its accepted range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParameterSpec {
    /// Parameter name as used by the models
    pub name: &'static str,
    /// Control label
    pub label: &'static str,
    /// Accepted range and initial value
    pub range: InputRange,
}

const ADDITIVITY: [ParameterSpec; 2] = [
    ParameterSpec {
        name: "sd1",
        label: "Dataset 1 Std Dev (σ₁)",
        range: InputRange::new(5.0, 50.0, 15.0),
    },
    ParameterSpec {
        name: "sd2",
        label: "Dataset 2 Std Dev (σ₂)",
        range: InputRange::new(5.0, 50.0, 20.0),
    },
];

const AVERAGING: [ParameterSpec; 2] = [
    ParameterSpec {
        name: "start_sd",
        label: "Start Std Dev",
        range: InputRange::new(5.0, 40.0, 10.0),
    },
    ParameterSpec {
        name: "end_sd",
        label: "End Std Dev",
        range: InputRange::new(20.0, 100.0, 50.0),
    },
];

const DISTANCE: [ParameterSpec; 3] = [
    ParameterSpec {
        name: "low_baseline",
        label: "Low Regime Baseline (σ₁)",
        range: InputRange::new(5.0, 25.0, 10.0),
    },
    ParameterSpec {
        name: "high_baseline",
        label: "High Regime Baseline (σ₂)",
        range: InputRange::new(30.0, 60.0, 40.0),
    },
    ParameterSpec {
        name: "shock",
        label: "Shock Size (+Δσ)",
        range: InputRange::new(1.0, 15.0, 5.0),
    },
];

const TIME: [ParameterSpec; 1] = [ParameterSpec {
    name: "daily_sd",
    label: "Daily Std Dev",
    range: InputRange::new(0.5, 3.0, 1.0).with_step(0.1),
}];

impl ModuleId {
    /// Controls of this lesson, in display order.
    pub fn parameters(&self) -> &'static [ParameterSpec] {
        match self {
            ModuleId::Additivity => &ADDITIVITY,
            ModuleId::Averaging => &AVERAGING,
            ModuleId::Distance => &DISTANCE,
            ModuleId::Time => &TIME,
        }
    }

    /// Look up one control by parameter name.
    pub fn parameter(&self, name: &str) -> Option<&'static ParameterSpec> {
        self.parameters().iter().find(|spec| spec.name == name)
    }
}
