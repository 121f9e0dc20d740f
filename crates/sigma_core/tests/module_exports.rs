//! Integration tests for module exports.
//!
//! Verify that all public modules and types are reachable via absolute paths.

use approx::assert_relative_eq;

/// Model functions are accessible via absolute path.
#[test]
fn test_models_module_exports() {
    use sigma_core::models::additivity::compute as additivity;
    use sigma_core::models::averaging::{compute as averaging, compute_with_step, max_gap, midpoint};
    use sigma_core::models::distance::{compute as distance, curve, curve_with_step};
    use sigma_core::models::time_scaling::{
        annual_summary, compute as time_scaling, compute_with_horizons, horizon_label,
        sqrt_time_multiplier, validate_horizons,
    };

    assert!(additivity(1.0_f64, 2.0).is_ok());

    let rows = averaging(1.0_f64, 2.0).unwrap();
    assert!(max_gap(&rows).is_some());
    assert!(midpoint(&rows).is_some());
    assert!(compute_with_step(1.0_f64, 2.0, 25).is_ok());

    assert!(distance(1.0_f64, 2.0, 0.5).is_ok());
    assert!(curve(3.0_f64).is_ok());
    assert!(curve_with_step(3.0_f64, 0.5).is_ok());

    let rows = time_scaling(1.0_f64).unwrap();
    assert!(annual_summary(&rows).is_some());
    assert!(compute_with_horizons(1.0_f64, &[1, 2]).is_ok());
    assert_eq!(horizon_label(21), Some("Month"));
    assert!(validate_horizons(&[1, 2, 3]).is_ok());
    let m: f64 = sqrt_time_multiplier(4).unwrap();
    assert_relative_eq!(m, 2.0);
}

/// Record types are re-exported from `models`.
#[test]
fn test_record_type_exports() {
    use sigma_core::models::{
        AdditivityResult, AveragingRow, ComparisonBar, DistanceResult, Point, RightTriangle,
        TimeScalingRow, VarianceCurvePoint, Verdict,
    };

    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AdditivityResult<f64>>();
    assert_send_sync::<AveragingRow<f64>>();
    assert_send_sync::<ComparisonBar<f64>>();
    assert_send_sync::<DistanceResult<f64>>();
    assert_send_sync::<Point<f64>>();
    assert_send_sync::<RightTriangle<f64>>();
    assert_send_sync::<TimeScalingRow<f64>>();
    assert_send_sync::<VarianceCurvePoint<f64>>();
    assert_send_sync::<Verdict>();
}

/// Error and ratio types are accessible from the crate root and `types`.
#[test]
fn test_types_module_exports() {
    use sigma_core::types::error::Result;
    use sigma_core::types::{Ratio, SigmaError, UndefinedReason};

    let ok: Result<f64> = Ratio::of(1.0, 2.0).into_result();
    assert_eq!(ok, Ok(0.5));

    let err: SigmaError = Ratio::<f64>::of(1.0, 0.0).into_result().unwrap_err();
    assert_eq!(err, SigmaError::UndefinedRatio(UndefinedReason::ZeroDenominator));

    let _root: sigma_core::Ratio<f64> = sigma_core::Ratio::Defined(1.0);
    let _root_err = sigma_core::SigmaError::UnknownModule("x".to_string());
}

/// Lesson catalog and dispatch are accessible from the crate root and `lesson`.
#[test]
fn test_lesson_module_exports() {
    use sigma_core::lesson::{
        Adjustment, InputRange, LessonInfo, LessonInput, LessonOutput, ModuleId, ParameterSpec,
        RangePolicy, CATALOG,
    };

    let info: &LessonInfo = &CATALOG[0];
    assert_eq!(info.id, ModuleId::Additivity);

    let spec: &ParameterSpec = &ModuleId::Time.parameters()[0];
    let range: InputRange = spec.range;
    assert_eq!(range.decimals(), 1);

    let (_, adjustments): (LessonInput, Vec<Adjustment>) = LessonInput::defaults(ModuleId::Time)
        .conform(RangePolicy::Clamp)
        .unwrap();
    assert!(adjustments.is_empty());

    let output: LessonOutput = sigma_core::LessonInput::defaults(sigma_core::ModuleId::Time)
        .evaluate()
        .unwrap();
    assert_eq!(output.module(), ModuleId::Time);
}
