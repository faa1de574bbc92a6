//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "site"          # Static pages and their assets
//! destination = "app"      # Generated React project
//! entry = "index.html"     # Page rendered by App.js, relative to source
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

use crate::config::ConfigError;

/// Build paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub entry: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: "site".into(),
            destination: "app".into(),
            entry: "index.html".into(),
        }
    }
}

impl BuildConfig {
    /// The entry page must name a document at the top of the source tree.
    ///
    /// Its module is always written as `src/App.js`, so imports it makes are
    /// only valid when the page itself sits at the source root.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entry.as_os_str().is_empty() {
            return Err(ConfigError::Validation("build.entry must not be empty".into()));
        }
        if self.entry.is_absolute() {
            return Err(ConfigError::Validation(format!(
                "build.entry `{}` must be relative to build.source",
                self.entry.display()
            )));
        }
        let components: Vec<_> = self.entry.components().collect();
        if !matches!(components.as_slice(), [Component::Normal(_)]) {
            return Err(ConfigError::Validation(format!(
                "build.entry `{}` must be a page directly inside build.source",
                self.entry.display()
            )));
        }
        if !crate::transpile::is_document(&self.entry) {
            return Err(ConfigError::Validation(format!(
                "build.entry `{}` is not an .html document",
                self.entry.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.source, PathBuf::from("site"));
        assert_eq!(config.build.destination, PathBuf::from("app"));
        assert_eq!(config.build.entry, PathBuf::from("index.html"));
        assert!(config.build.validate().is_ok());
    }

    #[test]
    fn test_build_section() {
        let config = test_parse_config("[build]\nsource = \"pages\"\nentry = \"home.htm\"");
        assert_eq!(config.build.source, PathBuf::from("pages"));
        assert_eq!(config.build.destination, PathBuf::from("app"));
        assert_eq!(config.build.entry, PathBuf::from("home.htm"));
    }

    #[test]
    fn test_entry_validation() {
        let config = test_parse_config("[build]\nentry = \"\"");
        assert!(config.build.validate().is_err());

        let config = test_parse_config("[build]\nentry = \"main.css\"");
        assert!(config.build.validate().is_err());
    }

    #[test]
    fn test_nested_entry_rejected() {
        let config = test_parse_config("[build]\nentry = \"pages/home.html\"");
        assert!(matches!(
            config.build.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("directly inside")
        ));

        let config = test_parse_config("[build]\nentry = \"../index.html\"");
        assert!(config.build.validate().is_err());

        let config = test_parse_config("[build]\nentry = \"home.html\"");
        assert!(config.build.validate().is_ok());
    }
}
