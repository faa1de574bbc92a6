//! Project configuration management for `reactify.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── scaffold   # [scaffold]
//! │   └── watch      # [watch]
//! ├── error          # ConfigError
//! ├── util           # find_config_file
//! └── mod.rs         # Config (this file)
//! ```
//!
//! # Sections
//!
//! | Section         | Purpose                                         |
//! |-----------------|-------------------------------------------------|
//! | `[build]`       | Source root, destination root, entry document   |
//! | `[scaffold]`    | Command generating a missing destination        |
//! | `[watch]`       | Debounce window for watch mode                  |
//! | `[attributes]`  | Extra attribute renames over the built-in table |

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{BuildConfig, ScaffoldConfig, WatchConfig};

use util::find_config_file;

use crate::{
    cli::{Cli, Commands},
    log,
    transpile::AttributeRenameTable,
    utils::path::normalize_path,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Directory inside the destination project receiving generated modules.
pub const OUTPUT_SUBDIR: &str = "src";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing reactify.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub scaffold: ScaffoldConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    /// Attribute renames layered over the built-in table
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, defaults
    /// apply as long as both roots are given on the command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let found = if cli.is_init() {
            None
        } else {
            find_config_file(&cli.config)
        };

        let mut config = match &found {
            Some(path) => Self::from_path(path)?,
            None if cli.is_init() || cli.has_roots() => Self::default(),
            None => bail!(ConfigError::Validation(format!(
                "config file '{}' not found. Run 'reactify init' or pass --source and --destination",
                cli.config.display()
            ))),
        };

        config.config_path = found.unwrap_or_else(|| cwd.join(&cli.config));
        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);

        config.apply_command_options(cli);
        config.normalize_paths(&root);

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Source root (absolute).
    pub fn source_dir(&self) -> &Path {
        &self.build.source
    }

    /// Destination project root (absolute).
    pub fn destination_dir(&self) -> &Path {
        &self.build.destination
    }

    /// Where generated modules and copied assets go.
    pub fn output_dir(&self) -> PathBuf {
        self.build.destination.join(OUTPUT_SUBDIR)
    }

    /// Entry document, relative to the source root.
    pub fn entry(&self) -> &Path {
        &self.build.entry
    }

    /// Entry document (absolute).
    pub fn entry_path(&self) -> PathBuf {
        self.build.source.join(&self.build.entry)
    }

    /// Path relative to the source root, if inside it.
    pub fn source_relative(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(&self.build.source)
            .ok()
            .map(Path::to_path_buf)
    }

    /// Rename table for this project.
    pub fn rename_table(&self) -> AttributeRenameTable {
        AttributeRenameTable::with_overrides(&self.attributes)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.build.source, cli.source.as_ref());
        Self::update_option(&mut self.build.destination, cli.destination.as_ref());

        if let Commands::Watch { debounce } = &cli.command {
            Self::update_option(&mut self.watch.debounce_ms, debounce.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve roots against the project root; `entry` stays source-relative.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.config_path = normalize_path(&self.config_path);
        self.build.source = normalize_path(&root.join(&self.build.source));
        self.build.destination = normalize_path(&root.join(&self.build.destination));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    pub fn validate(&self) -> Result<()> {
        self.build.validate()?;
        self.scaffold.validate()?;

        if self.build.destination.starts_with(&self.build.source) {
            bail!(ConfigError::Validation(format!(
                "destination `{}` must not be inside source `{}`",
                self.build.destination.display(),
                self.build.source.display()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Config rooted at `root` with both directories resolved under it.
#[cfg(test)]
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.scaffold.enable = false;
    config.normalize_paths(root);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = Config::from_str("[build\nsource = \"site\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.get_root(), Path::new(""));
        assert_eq!(config.build.entry, PathBuf::from("index.html"));
        assert_eq!(config.watch.debounce_ms, 300);
        assert!(config.attributes.is_empty());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[build]\nsource = \"x\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = Config::parse_with_ignored(content).unwrap();
        assert_eq!(config.build.source, PathBuf::from("x"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_attribute_overrides() {
        let config = test_parse_config(
            "[attributes]\n\"accept-charset\" = \"acceptCharset\"\nclass = \"class\"",
        );
        let table = config.rename_table();
        assert_eq!(table.rename("accept-charset"), "acceptCharset");
        assert_eq!(table.rename("class"), "class");
        assert_eq!(table.rename("for"), "htmlFor");
    }

    #[test]
    fn test_normalized_paths() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = test_config(temp.path());
        let root = normalize_path(temp.path());

        assert_eq!(config.source_dir(), root.join("site"));
        assert_eq!(config.destination_dir(), root.join("app"));
        assert_eq!(config.output_dir(), root.join("app/src"));
        assert_eq!(config.entry_path(), root.join("site/index.html"));
        assert_eq!(
            config.source_relative(&root.join("site/blog/a.html")),
            Some(PathBuf::from("blog/a.html"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_destination_inside_source_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = test_config(temp.path());
        config.build.destination = config.build.source.join("out");
        assert!(config.validate().is_err());
    }
}
