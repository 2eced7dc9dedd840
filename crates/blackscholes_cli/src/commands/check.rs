//! Check command implementation
//!
//! Prints the resolved configuration.

use std::path::Path;

use crate::settings::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig, source: &Path) -> Result<String> {
    let found = if source.exists() { "found" } else { "not found, using defaults" };
    Ok(format!(
        "# configuration file: {} ({found})\n{}",
        source.display(),
        config.to_toml()?
    ))
}
