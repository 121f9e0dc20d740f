//! Single-lesson commands
//!
//! Builds a lesson's inputs from command-line values, falling back to the
//! configured settings and the lesson's initial values, then evaluates and
//! renders it.

use std::io::Write;

use sigma_core::lesson::{LessonInput, ModuleId, RangePolicy};
use sigma_core::LessonOutput;
use tracing::{debug, info, warn};

use crate::config::CliConfig;
use crate::render;
use crate::Result;

/// Initial value of a lesson control.
fn initial(module: ModuleId, name: &str) -> f64 {
    module
        .parameter(name)
        .map(|spec| spec.range.default)
        .unwrap_or_default()
}

/// Lesson inputs at their initial values, with sweep and curve settings
/// taken from the configuration.
pub fn configured_defaults(module: ModuleId, config: &CliConfig) -> LessonInput {
    match LessonInput::defaults(module) {
        LessonInput::Averaging {
            start_sd, end_sd, ..
        } => LessonInput::Averaging {
            start_sd,
            end_sd,
            weight_step_percent: config.averaging.weight_step_percent,
        },
        LessonInput::Distance {
            low_baseline,
            high_baseline,
            shock,
            ..
        } => LessonInput::Distance {
            low_baseline,
            high_baseline,
            shock,
            curve_margin: config.distance.curve_margin,
            curve_step: config.distance.curve_step,
        },
        LessonInput::Time { daily_sd, .. } => LessonInput::Time {
            daily_sd,
            horizons: config.time.horizons.clone(),
        },
        other => other,
    }
}

/// Inputs for `sigma additivity`.
pub fn additivity_input(sd1: Option<f64>, sd2: Option<f64>) -> LessonInput {
    let module = ModuleId::Additivity;
    LessonInput::Additivity {
        sd1: sd1.unwrap_or_else(|| initial(module, "sd1")),
        sd2: sd2.unwrap_or_else(|| initial(module, "sd2")),
    }
}

/// Inputs for `sigma averaging`.
pub fn averaging_input(
    start: Option<f64>,
    end: Option<f64>,
    step: Option<u32>,
    config: &CliConfig,
) -> LessonInput {
    let module = ModuleId::Averaging;
    LessonInput::Averaging {
        start_sd: start.unwrap_or_else(|| initial(module, "start_sd")),
        end_sd: end.unwrap_or_else(|| initial(module, "end_sd")),
        weight_step_percent: step.unwrap_or(config.averaging.weight_step_percent),
    }
}

/// Inputs for `sigma distance`.
pub fn distance_input(
    low: Option<f64>,
    high: Option<f64>,
    shock: Option<f64>,
    margin: Option<f64>,
    curve_step: Option<f64>,
    config: &CliConfig,
) -> LessonInput {
    let module = ModuleId::Distance;
    LessonInput::Distance {
        low_baseline: low.unwrap_or_else(|| initial(module, "low_baseline")),
        high_baseline: high.unwrap_or_else(|| initial(module, "high_baseline")),
        shock: shock.unwrap_or_else(|| initial(module, "shock")),
        curve_margin: margin.unwrap_or(config.distance.curve_margin),
        curve_step: curve_step.unwrap_or(config.distance.curve_step),
    }
}

/// Inputs for `sigma time`. An empty horizon list means the configured set.
pub fn time_input(daily_sd: Option<f64>, horizons: Vec<u32>, config: &CliConfig) -> LessonInput {
    LessonInput::Time {
        daily_sd: daily_sd.unwrap_or_else(|| initial(ModuleId::Time, "daily_sd")),
        horizons: if horizons.is_empty() {
            config.time.horizons.clone()
        } else {
            horizons
        },
    }
}

/// Conform inputs to their ranges and run the lesson.
///
/// Returns the inputs actually evaluated alongside the records.
pub fn evaluate(
    input: LessonInput,
    policy: RangePolicy,
) -> Result<(LessonInput, LessonOutput)> {
    let module = input.module();
    info!("Running {} lesson", module);
    debug!("Inputs: {:?}", input);

    let (input, adjustments) = input.conform(policy)?;
    for adjustment in &adjustments {
        warn!(
            "Clamped {} from {} to {}",
            adjustment.parameter, adjustment.from, adjustment.to
        );
    }

    let output = input.evaluate()?;
    match &output {
        LessonOutput::Additivity(r) => {
            debug!("Combined SD {} vs naive {}", r.actual_sd, r.naive_sd)
        }
        LessonOutput::Averaging(rows) => debug!("{} weight rows", rows.len()),
        LessonOutput::Distance { result, curve } => debug!(
            "Impact ratio {} over {} curve points",
            result.impact_ratio,
            curve.len()
        ),
        LessonOutput::Time(rows) => debug!("{} horizon rows", rows.len()),
    }

    info!("{} lesson complete", module);
    Ok((input, output))
}

/// Evaluate one lesson and write it to `out`.
pub fn run_to<W: Write>(input: LessonInput, config: &CliConfig, out: &mut W) -> Result<()> {
    let (input, output) = evaluate(input, config.range_policy())?;
    render::write_output(&input, &output, config.format, out)
}

/// Evaluate one lesson and write it to stdout.
pub fn run(input: LessonInput, config: &CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_to(input, config, &mut out)
}
