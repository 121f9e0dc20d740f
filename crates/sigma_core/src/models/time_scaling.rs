//! Square-root-of-time scaling.
//!
//! For independent, identically distributed daily increments the variances
//! add over `h` days, so the `h`-day SD is `daily_sd · √h`. Scaling the SD
//! linearly (`daily_sd · h`) overstates it by a factor of `√h`. Each row
//! carries the variance sum `daily_sd² · h` the square-root rule comes from.

use num_traits::Float;

use crate::types::{Result, SigmaError};
use crate::validation::{cast, finite, non_negative};

/// Trading days in a year.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Day, week, month, quarter, half-year and year in trading days.
pub const DEFAULT_HORIZONS: [u32; 6] = [1, 5, 21, 63, 126, TRADING_DAYS_PER_YEAR];

/// One horizon of the scaling table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeScalingRow<T> {
    /// Horizon length in days
    pub horizon_days: u32,
    /// `daily_sd · horizon_days`
    pub naive_sd: T,
    /// `daily_sd · √horizon_days`
    pub actual_sd: T,
    /// `daily_sd²`
    pub daily_variance: T,
    /// `daily_sd² · horizon_days`, the variance accumulated over the horizon
    pub cumulative_variance: T,
}

impl<T: Float> TimeScalingRow<T> {
    /// `naive_sd - actual_sd`, the overstatement of linear scaling.
    pub fn overstatement(&self) -> T {
        self.naive_sd - self.actual_sd
    }
}

impl<T> TimeScalingRow<T> {
    /// Calendar name of the horizon, for the default horizon set.
    pub fn label(&self) -> Option<&'static str> {
        horizon_label(self.horizon_days)
    }
}

/// Calendar name of a horizon in trading days.
pub fn horizon_label(horizon_days: u32) -> Option<&'static str> {
    match horizon_days {
        1 => Some("Day"),
        5 => Some("Week"),
        21 => Some("Month"),
        63 => Some("Quarter"),
        126 => Some("Half-year"),
        TRADING_DAYS_PER_YEAR => Some("Year"),
        _ => None,
    }
}

/// Scale `daily_sd` across [`DEFAULT_HORIZONS`].
pub fn compute<T: Float>(daily_sd: T) -> Result<Vec<TimeScalingRow<T>>> {
    compute_with_horizons(daily_sd, &DEFAULT_HORIZONS)
}

/// Scale `daily_sd` across `horizons`, preserving their order.
///
/// # Errors
///
/// `SigmaError::InvalidInput` if `daily_sd` is negative or non-finite, if
/// `horizons` is empty, contains zero, or is not strictly ascending, or if a
/// scaled value overflows.
///
/// # Example
///
/// ```
/// use sigma_core::models::time_scaling;
///
/// let rows = time_scaling::compute_with_horizons(2.0_f64, &[1, 4, 9]).unwrap();
/// let actual: Vec<f64> = rows.iter().map(|r| r.actual_sd).collect();
/// assert_eq!(actual, vec![2.0, 4.0, 6.0]);
/// assert_eq!(rows[2].naive_sd, 18.0);
/// assert_eq!(rows[2].cumulative_variance, 36.0);
/// ```
pub fn compute_with_horizons<T: Float>(
    daily_sd: T,
    horizons: &[u32],
) -> Result<Vec<TimeScalingRow<T>>> {
    let daily_sd = non_negative("daily_sd", daily_sd)?;
    validate_horizons(horizons)?;
    let daily_variance = finite("daily_sd", daily_sd * daily_sd)?;

    horizons
        .iter()
        .map(|&horizon_days| {
            let h: T = cast("horizons", horizon_days)?;
            Ok(TimeScalingRow {
                horizon_days,
                naive_sd: finite("daily_sd", daily_sd * h)?,
                actual_sd: daily_sd * h.sqrt(),
                daily_variance,
                cumulative_variance: finite("daily_sd", daily_variance * h)?,
            })
        })
        .collect()
}

/// Check that `horizons` is a non-empty, strictly ascending set of positive days.
pub fn validate_horizons(horizons: &[u32]) -> Result<()> {
    if horizons.is_empty() {
        return Err(SigmaError::invalid_input("horizons", "must not be empty"));
    }
    if horizons[0] == 0 {
        return Err(SigmaError::invalid_input(
            "horizons",
            "must be positive, got 0",
        ));
    }
    if let Some(pair) = horizons.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(SigmaError::invalid_input(
            "horizons",
            format!(
                "must be strictly ascending, got {} followed by {}",
                pair[0], pair[1]
            ),
        ));
    }
    Ok(())
}

/// Square-root multiplier from one-day to `horizon_days` SD.
///
/// ```
/// use sigma_core::models::time_scaling::{sqrt_time_multiplier, TRADING_DAYS_PER_YEAR};
///
/// let m: f64 = sqrt_time_multiplier(TRADING_DAYS_PER_YEAR).unwrap();
/// assert!((m - 15.8745).abs() < 1e-4);
/// ```
pub fn sqrt_time_multiplier<T: Float>(horizon_days: u32) -> Result<T> {
    let h: T = cast("horizon_days", horizon_days)?;
    Ok(h.sqrt())
}

/// The longest horizon's row (the annual figure for the default set).
pub fn annual_summary<T>(rows: &[TimeScalingRow<T>]) -> Option<&TimeScalingRow<T>> {
    rows.last()
}
