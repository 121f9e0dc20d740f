//! Run command implementation
//!
//! Evaluates a lesson described by a JSON file, e.g.
//! `{"module": "distance", "low_baseline": 10, "high_baseline": 40, "shock": 5}`.

use std::path::Path;

use sigma_core::LessonInput;
use tracing::info;

use super::lesson;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Read and parse a lesson input file.
pub fn load(path: &Path) -> Result<LessonInput> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    info!("Loading lesson input from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Run the run command
pub fn run(path: &Path, config: &CliConfig) -> Result<()> {
    let input = load(path)?;
    lesson::run(input, config)
}
