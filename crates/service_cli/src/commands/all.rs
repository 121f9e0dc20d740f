//! All command implementation
//!
//! Runs every lesson at its initial values, in catalog order.

use std::io::Write;

use sigma_core::lesson::ModuleId;
use tracing::info;

use super::lesson::{configured_defaults, evaluate};
use crate::config::CliConfig;
use crate::render;
use crate::Result;

/// Evaluate every lesson and write the results to `out`.
pub fn run_to<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    info!("Running all {} lessons", ModuleId::ALL.len());

    let lessons = ModuleId::ALL
        .iter()
        .map(|&id| evaluate(configured_defaults(id, config), config.range_policy()))
        .collect::<Result<Vec<_>>>()?;

    render::write_outputs(&lessons, config.format, out)
}

/// Run the all command
pub fn run(config: &CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_to(config, &mut out)
}
