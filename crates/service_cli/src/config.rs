//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (`SIGMA_LOG_LEVEL`, `SIGMA_FORMAT`, `SIGMA_CLAMP_INPUTS`)
//! 3. Config file
//! 4. Default values

use serde::Deserialize;
use sigma_core::lesson::RangePolicy;
use sigma_core::models::averaging::DEFAULT_WEIGHT_STEP_PERCENT;
use sigma_core::models::distance::{DEFAULT_CURVE_MARGIN, DEFAULT_CURVE_STEP};
use sigma_core::models::time_scaling::{validate_horizons, DEFAULT_HORIZONS};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sigma.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables with the worked arithmetic
    #[default]
    Table,
    /// Pretty-printed JSON records
    Json,
    /// One CSV row per plotted record
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// `[averaging]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AveragingSection {
    /// Weight sweep spacing in percent
    pub weight_step_percent: u32,
}

impl Default for AveragingSection {
    fn default() -> Self {
        Self {
            weight_step_percent: DEFAULT_WEIGHT_STEP_PERCENT,
        }
    }
}

/// `[distance]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DistanceSection {
    /// Curve extends this far past the larger shocked SD
    pub curve_margin: f64,
    /// Curve sample spacing
    pub curve_step: f64,
}

impl Default for DistanceSection {
    fn default() -> Self {
        Self {
            curve_margin: DEFAULT_CURVE_MARGIN,
            curve_step: DEFAULT_CURVE_STEP,
        }
    }
}

/// `[time]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimeSection {
    /// Horizons in days, strictly ascending
    pub horizons: Vec<u32>,
}

impl Default for TimeSection {
    fn default() -> Self {
        Self {
            horizons: DEFAULT_HORIZONS.to_vec(),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Output format
    pub format: OutputFormat,
    /// Clamp out-of-range inputs instead of rejecting them
    pub clamp_inputs: bool,
    /// Averaging lesson settings
    pub averaging: AveragingSection,
    /// Distance lesson settings
    pub distance: DistanceSection,
    /// Time lesson settings
    pub time: TimeSection,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("SIGMA_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(format) = lookup("SIGMA_FORMAT") {
            self.format = OutputFormat::from_str(&format)?;
        }
        if let Some(clamp) = lookup("SIGMA_CLAMP_INPUTS") {
            self.clamp_inputs = matches!(clamp.to_lowercase().as_str(), "true" | "1" | "yes");
        }
        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.clamp {
            self.clamp_inputs = true;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.averaging.weight_step_percent;
        if step == 0 || 100 % step != 0 {
            return Err(ConfigError::InvalidValue {
                key: "averaging.weight_step_percent",
                reason: format!("must be a positive divisor of 100, got {}", step),
            });
        }

        let margin = self.distance.curve_margin;
        if !margin.is_finite() || margin < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "distance.curve_margin",
                reason: format!("must be finite and non-negative, got {}", margin),
            });
        }

        let curve_step = self.distance.curve_step;
        if !curve_step.is_finite() || curve_step <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "distance.curve_step",
                reason: format!("must be finite and positive, got {}", curve_step),
            });
        }

        validate_horizons(&self.time.horizons).map_err(|e| ConfigError::InvalidValue {
            key: "time.horizons",
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Range policy implied by `clamp_inputs`
    pub fn range_policy(&self) -> RangePolicy {
        if self.clamp_inputs {
            RangePolicy::Clamp
        } else {
            RangePolicy::Reject
        }
    }
}

/// Global CLI flags relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path given with `--config`
    pub config_file: Option<std::path::PathBuf>,
    /// `--verbose`
    pub verbose: bool,
    /// `--format`
    pub format: Option<OutputFormat>,
    /// `--clamp`
    pub clamp: bool,
}

/// Build configuration from all sources
///
/// An explicitly named config file must exist; the default `sigma.toml` is
/// read only when present.
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            CliConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => CliConfig::default(),
    };

    config = config.with_env_override()?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
