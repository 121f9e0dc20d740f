//! Output rendering
//!
//! Writes lesson records as a human-readable table, pretty JSON or CSV.
//! Everything goes to the supplied writer; logging stays on stderr.

use std::io::Write;

use serde::Serialize;
use sigma_core::lesson::{LessonInfo, CATALOG};
use sigma_core::models::averaging::max_gap;
use sigma_core::models::time_scaling::{annual_summary, sqrt_time_multiplier};
use sigma_core::models::{
    AdditivityResult, AveragingRow, DistanceResult, TimeScalingRow, VarianceCurvePoint,
};
use sigma_core::{LessonInput, LessonOutput, Ratio};

use crate::config::OutputFormat;
use crate::{CliError, Result};

/// Flattened additivity record; an undefined error percentage is an empty cell.
#[derive(Serialize)]
struct AdditivityCsvRow {
    sd1: f64,
    sd2: f64,
    variance1: f64,
    variance2: f64,
    total_variance: f64,
    actual_sd: f64,
    naive_sd: f64,
    error_percent: Option<f64>,
}

impl From<&AdditivityResult<f64>> for AdditivityCsvRow {
    fn from(r: &AdditivityResult<f64>) -> Self {
        Self {
            sd1: r.sd1,
            sd2: r.sd2,
            variance1: r.variance1,
            variance2: r.variance2,
            total_variance: r.total_variance,
            actual_sd: r.actual_sd,
            naive_sd: r.naive_sd,
            error_percent: r.error_percent.value(),
        }
    }
}

/// Curve sample with the shocked intervals marked, followed by the shock
/// comparison it illustrates (repeated on every row).
#[derive(Serialize)]
struct DistanceCsvRow {
    sd: f64,
    variance: f64,
    in_low_shock: bool,
    in_high_shock: bool,
    shock: f64,
    low_start: f64,
    low_end: f64,
    high_start: f64,
    high_end: f64,
    variance_delta_low: f64,
    variance_delta_high: f64,
    impact_ratio: Option<f64>,
}

impl DistanceCsvRow {
    fn new(result: &DistanceResult<f64>, point: &VarianceCurvePoint<f64>) -> Self {
        Self {
            sd: point.sd,
            variance: point.variance,
            in_low_shock: (result.low_start..=result.low_end).contains(&point.sd),
            in_high_shock: (result.high_start..=result.high_end).contains(&point.sd),
            shock: result.shock,
            low_start: result.low_start,
            low_end: result.low_end,
            high_start: result.high_start,
            high_end: result.high_end,
            variance_delta_low: result.variance_delta_low,
            variance_delta_high: result.variance_delta_high,
            impact_ratio: result.impact_ratio.value(),
        }
    }
}

#[derive(Serialize)]
struct TimeCsvRow {
    horizon_days: u32,
    label: &'static str,
    naive_sd: f64,
    actual_sd: f64,
    daily_variance: f64,
    cumulative_variance: f64,
}

/// Write one lesson's records in the requested format.
///
/// `input` is echoed at control precision in table output only.
pub fn write_output<W: Write>(
    input: &LessonInput,
    output: &LessonOutput,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(input, output, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, output)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(output, out),
    }
}

/// Write several lessons' records.
///
/// CSV is rejected: the lessons produce differently shaped rows.
pub fn write_outputs<W: Write>(
    lessons: &[(LessonInput, LessonOutput)],
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for (i, (input, output)) in lessons.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_table(input, output, out)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let outputs: Vec<&LessonOutput> = lessons.iter().map(|(_, output)| output).collect();
            serde_json::to_writer_pretty(&mut *out, &outputs)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => Err(CliError::invalid_argument(
            "csv output needs a single lesson; use table or json for `all`",
        )),
    }
}

/// Write the lesson catalog.
pub fn write_catalog<W: Write>(format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for info in &CATALOG {
                writeln!(
                    out,
                    "{:<11} {} ({})",
                    info.id.as_str(),
                    info.title,
                    info.short_description
                )?;
                writeln!(out, "{:<11} {}", "", info.description)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &CATALOG)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            for info in &CATALOG {
                wtr.serialize(info)?;
            }
            wtr.flush()?;
            Ok(())
        }
    }
}

fn write_csv<W: Write>(output: &LessonOutput, out: &mut W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    match output {
        LessonOutput::Additivity(r) => wtr.serialize(AdditivityCsvRow::from(r))?,
        LessonOutput::Averaging(rows) => {
            for row in rows {
                wtr.serialize(row)?;
            }
        }
        LessonOutput::Distance { result, curve } => {
            for point in curve {
                wtr.serialize(DistanceCsvRow::new(result, point))?;
            }
        }
        LessonOutput::Time(rows) => {
            for row in rows {
                wtr.serialize(TimeCsvRow {
                    horizon_days: row.horizon_days,
                    label: row.label().unwrap_or(""),
                    naive_sd: row.naive_sd,
                    actual_sd: row.actual_sd,
                    daily_variance: row.daily_variance,
                    cumulative_variance: row.cumulative_variance,
                })?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_table<W: Write>(input: &LessonInput, output: &LessonOutput, out: &mut W) -> Result<()> {
    let info = output.module().info();
    writeln!(out, "{}", info.title)?;
    writeln!(out, "{}", "=".repeat(info.title.chars().count()))?;
    write_controls(input, out)?;
    writeln!(out)?;

    match output {
        LessonOutput::Additivity(r) => additivity_table(r, out)?,
        LessonOutput::Averaging(rows) => averaging_table(rows, out)?,
        LessonOutput::Distance { result, curve } => distance_table(result, curve, out)?,
        LessonOutput::Time(rows) => time_table(rows, out)?,
    }

    write_insight(info, out)
}

/// One `label: value` line per control, at the control's display precision.
fn write_controls<W: Write>(input: &LessonInput, out: &mut W) -> Result<()> {
    let module = input.module();
    for (name, value) in input.controls() {
        match module.parameter(name) {
            Some(spec) => writeln!(
                out,
                "{}: {:.*}",
                spec.label,
                spec.range.decimals(),
                value
            )?,
            None => writeln!(out, "{}: {}", name, value)?,
        }
    }
    Ok(())
}

fn write_insight<W: Write>(info: &LessonInfo, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Insight: {}", info.insight)?;
    Ok(())
}

fn percent(ratio: Ratio<f64>) -> String {
    match ratio {
        Ratio::Defined(v) => format!("{:.1}%", v),
        Ratio::Undefined(reason) => format!("N/A ({})", reason),
    }
}

fn additivity_table<W: Write>(r: &AdditivityResult<f64>, out: &mut W) -> Result<()> {
    writeln!(out, "σ₁ = {:.2}    σ₁² = {:.2}", r.sd1, r.variance1)?;
    writeln!(out, "σ₂ = {:.2}    σ₂² = {:.2}", r.sd2, r.variance2)?;
    writeln!(
        out,
        "Total variance   {:.2} + {:.2} = {:.2}",
        r.variance1, r.variance2, r.total_variance
    )?;
    writeln!(
        out,
        "Combined SD      √{:.2} = {:.2}",
        r.total_variance, r.actual_sd
    )?;
    writeln!(
        out,
        "Naive sum        {:.2} + {:.2} = {:.2}",
        r.sd1, r.sd2, r.naive_sd
    )?;
    writeln!(out, "Naive error      {}", percent(r.error_percent))?;

    let legs = r.triangle().leg_lengths();
    writeln!(
        out,
        "Triangle         legs {:.2} and {:.2}, hypotenuse {:.2}",
        legs.0,
        legs.1,
        r.triangle().hypotenuse_length()
    )?;
    Ok(())
}

fn averaging_table<W: Write>(rows: &[AveragingRow<f64>], out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{:>6}  {:>10}  {:>10}  {:>8}",
        "weight", "linear σ", "RMS σ", "gap"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>6}  {:>10.2}  {:>10.2}  {:>8.2}",
            row.label(),
            row.naive_sd,
            row.rms_sd,
            row.gap
        )?;
    }

    if let Some(widest) = max_gap(rows) {
        writeln!(
            out,
            "Widest gap at {}: RMS {:.2} vs linear {:.2} (+{:.2})",
            widest.label(),
            widest.rms_sd,
            widest.naive_sd,
            widest.gap
        )?;
    }
    Ok(())
}

fn distance_table<W: Write>(
    r: &DistanceResult<f64>,
    curve: &[VarianceCurvePoint<f64>],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Shock            +{:.2} σ", r.shock)?;
    writeln!(
        out,
        "Low regime       {:.2} → {:.2}   Δvariance = {:.2}² - {:.2}² = {:.2}",
        r.low_start, r.low_end, r.low_end, r.low_start, r.variance_delta_low
    )?;
    writeln!(
        out,
        "High regime      {:.2} → {:.2}   Δvariance = {:.2}² - {:.2}² = {:.2}",
        r.high_start, r.high_end, r.high_end, r.high_start, r.variance_delta_high
    )?;
    match r.impact_ratio {
        Ratio::Defined(v) => writeln!(out, "Impact ratio     {:.2}x", v)?,
        Ratio::Undefined(reason) => writeln!(out, "Impact ratio     N/A ({})", reason)?,
    }
    if let (Some(first), Some(last)) = (curve.first(), curve.last()) {
        writeln!(
            out,
            "Variance curve   {} points on [{:.2}, {:.2}]",
            curve.len(),
            first.sd,
            last.sd
        )?;
    }
    Ok(())
}

fn time_table<W: Write>(rows: &[TimeScalingRow<f64>], out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{:>7}  {:<10}  {:>10}  {:>10}  {:>12}  {:>12}",
        "days", "horizon", "linear σ", "√T σ", "overstated", "Σσ²"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>7}  {:<10}  {:>10.2}  {:>10.2}  {:>12.2}  {:>12.2}",
            row.horizon_days,
            row.label().unwrap_or("-"),
            row.naive_sd,
            row.actual_sd,
            row.overstatement(),
            row.cumulative_variance
        )?;
    }

    if let Some(last) = annual_summary(rows) {
        let multiplier: f64 = sqrt_time_multiplier(last.horizon_days)?;
        writeln!(out, "Daily variance   σ² = {:.2}", last.daily_variance)?;
        writeln!(
            out,
            "Over {} days     Σσ² = {:.2} × {} = {:.2}",
            last.horizon_days, last.daily_variance, last.horizon_days, last.cumulative_variance
        )?;
        writeln!(
            out,
            "Over {} days: σ = daily × √{} = daily × {:.2} = {:.2}",
            last.horizon_days, last.horizon_days, multiplier, last.actual_sd
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigma_core::lesson::ModuleId;

    fn lesson(input: LessonInput) -> (LessonInput, LessonOutput) {
        let output = input.evaluate().unwrap();
        (input, output)
    }

    fn render(input: LessonInput, format: OutputFormat) -> String {
        let (input, output) = lesson(input);
        let mut buf = Vec::new();
        write_output(&input, &output, format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render_default(id: ModuleId, format: OutputFormat) -> String {
        render(LessonInput::defaults(id), format)
    }

    #[test]
    fn test_additivity_table() {
        let text = render_default(ModuleId::Additivity, OutputFormat::Table);
        assert!(text.starts_with("Additivity & Independence\n"));
        assert!(text.contains("225.00 + 400.00 = 625.00"));
        assert!(text.contains("√625.00 = 25.00"));
        assert!(text.contains("15.00 + 20.00 = 35.00"));
        assert!(text.contains("40.0%"));
        assert!(text.contains("Insight: "));
    }

    #[test]
    fn test_table_echoes_controls_at_display_precision() {
        let text = render_default(ModuleId::Additivity, OutputFormat::Table);
        assert!(text.contains("Dataset 1 Std Dev (σ₁): 15\n"));
        assert!(text.contains("Dataset 2 Std Dev (σ₂): 20\n"));

        let input = LessonInput::Time {
            daily_sd: 1.34,
            horizons: vec![1, 252],
        };
        let text = render(input, OutputFormat::Table);
        assert!(text.contains("Daily Std Dev: 1.3\n"));
    }

    #[test]
    fn test_additivity_table_undefined_error() {
        let text = render(LessonInput::Additivity { sd1: 0.0, sd2: 0.0 }, OutputFormat::Table);
        assert!(text.contains("N/A (denominator is zero)"));
    }

    #[test]
    fn test_additivity_csv_empty_cell_when_undefined() {
        let text = render(LessonInput::Additivity { sd1: 0.0, sd2: 0.0 }, OutputFormat::Csv);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "sd1,sd2,variance1,variance2,total_variance,actual_sd,naive_sd,error_percent"
        );
        assert!(lines.next().unwrap().ends_with(','));
    }

    #[test]
    fn test_averaging_csv_row_count() {
        let text = render_default(ModuleId::Averaging, OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "weight_percent,weight,naive_sd,rms_sd,gap");
        // header + 21 rows at 5% spacing
        assert_eq!(lines.len(), 22);
        assert!(lines[1].starts_with("0,0.0,10.0,10.0,"));
    }

    #[test]
    fn test_averaging_table_reports_widest_gap() {
        let text = render_default(ModuleId::Averaging, OutputFormat::Table);
        assert!(text.contains("Widest gap at"));
        assert!(text.contains("100%"));
    }

    #[test]
    fn test_distance_table() {
        let text = render_default(ModuleId::Distance, OutputFormat::Table);
        assert!(text.contains("Δvariance = 15.00² - 10.00² = 125.00"));
        assert!(text.contains("Δvariance = 45.00² - 40.00² = 425.00"));
        assert!(text.contains("3.40x"));
        assert!(text.contains("56 points on [0.00, 55.00]"));
    }

    #[test]
    fn test_distance_csv_marks_shock_intervals() {
        let text = render_default(ModuleId::Distance, OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("sd,variance,in_low_shock,in_high_shock,"));
        assert_eq!(lines.len(), 57);
        assert!(lines[1].starts_with("0.0,0.0,false,false,"));
        assert!(lines[11].starts_with("10.0,100.0,true,false,"));
        assert!(lines[41].starts_with("40.0,1600.0,false,true,"));
    }

    #[test]
    fn test_distance_csv_carries_shock_comparison() {
        let text = render_default(ModuleId::Distance, OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "sd,variance,in_low_shock,in_high_shock,shock,low_start,low_end,\
             high_start,high_end,variance_delta_low,variance_delta_high,impact_ratio"
        );
        for line in &lines[1..] {
            assert!(line.ends_with(",5.0,10.0,15.0,40.0,45.0,125.0,425.0,3.4"));
        }
    }

    #[test]
    fn test_distance_csv_undefined_ratio_is_empty_cell() {
        let input = LessonInput::Distance {
            low_baseline: 10.0,
            high_baseline: 40.0,
            shock: 0.0,
            curve_margin: 0.0,
            curve_step: 1.0,
        };
        let text = render(input, OutputFormat::Csv);
        assert!(text.lines().nth(1).unwrap().ends_with(",0.0,0.0,"));
    }

    #[test]
    fn test_time_csv_labels_and_variances() {
        let text = render_default(ModuleId::Time, OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "horizon_days,label,naive_sd,actual_sd,daily_variance,cumulative_variance"
        );
        assert_eq!(lines[1], "1,Day,1.0,1.0,1.0,1.0");
        assert!(lines[6].starts_with("252,Year,252.0,15.87"));
        assert!(lines[6].ends_with(",1.0,252.0"));
    }

    #[test]
    fn test_time_table_summary() {
        let text = render_default(ModuleId::Time, OutputFormat::Table);
        assert!(text.contains("Half-year"));
        assert!(text.contains("Daily variance   σ² = 1.00"));
        assert!(text.contains("Σσ² = 1.00 × 252 = 252.00"));
        assert!(text.contains("daily × √252 = daily × 15.87 = 15.87"));
    }

    #[test]
    fn test_json_is_tagged() {
        let text = render_default(ModuleId::Distance, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["module"], "distance");
        assert_eq!(value["output"]["result"]["impact_ratio"]["defined"], 3.4);
    }

    #[test]
    fn test_write_outputs_rejects_csv() {
        let lessons = vec![lesson(LessonInput::defaults(ModuleId::Additivity))];
        let mut buf = Vec::new();
        let err = write_outputs(&lessons, OutputFormat::Csv, &mut buf).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_write_outputs_json_array() {
        let lessons: Vec<_> = ModuleId::ALL
            .iter()
            .map(|&id| lesson(LessonInput::defaults(id)))
            .collect();
        let mut buf = Vec::new();
        write_outputs(&lessons, OutputFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[3]["module"], "time");
        assert_eq!(value[3]["output"][5]["cumulative_variance"], 252.0);
    }

    #[test]
    fn test_catalog_formats() {
        let mut buf = Vec::new();
        write_catalog(OutputFormat::Table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Time Aggregation (The √T Rule)"));

        let mut buf = Vec::new();
        write_catalog(OutputFormat::Csv, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(1).unwrap().starts_with("additivity,"));

        let mut buf = Vec::new();
        write_catalog(OutputFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[2]["id"], "distance");
    }
}
