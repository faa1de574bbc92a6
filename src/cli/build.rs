//! `build` command.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::project::{self, BuildReport};

/// Run one full pass. Per-document failures are in the report.
pub fn build_project(config: &Config) -> Result<BuildReport> {
    project::run_batch(config).with_context(|| {
        format!(
            "Failed to build '{}' into '{}'",
            config.source_dir().display(),
            config.destination_dir().display()
        )
    })
}
