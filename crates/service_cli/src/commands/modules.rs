//! Modules command implementation
//!
//! Lists the lesson catalog.

use tracing::info;

use crate::config::CliConfig;
use crate::render;
use crate::Result;

/// Run the modules command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Listing lessons");
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render::write_catalog(config.format, &mut out)
}
