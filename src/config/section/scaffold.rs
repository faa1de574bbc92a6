//! `[scaffold]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scaffold]
//! enable = true
//! command = ["npx", "create-react-app"]   # destination is appended
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Destination project generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Run `command` when the destination does not exist yet.
    pub enable: bool,
    pub command: Vec<String>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            enable: true,
            command: vec!["npx".into(), "create-react-app".into()],
        }
    }
}

impl ScaffoldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enable && self.command.first().is_none_or(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "scaffold.command must name a program when scaffold.enable is set".into(),
            ));
        }
        Ok(())
    }
}
