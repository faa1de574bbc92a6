//! `init` command: write a commented default configuration.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::config::Config;
use crate::log;

/// Generate reactify.toml content with comments
pub fn generate_config_template() -> String {
    let defaults = Config::default();
    let command = defaults
        .scaffold
        .command
        .iter()
        .map(|part| format!("\"{part}\""))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str(&format!(
        "# reactify configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    ));

    out.push_str("[build]\n");
    out.push_str(&format!(
        "source = \"{}\"          # Static pages and their assets\n",
        defaults.build.source.display()
    ));
    out.push_str(&format!(
        "destination = \"{}\"      # Generated React project\n",
        defaults.build.destination.display()
    ));
    out.push_str(&format!(
        "entry = \"{}\"     # Rendered by App.js, relative to source\n\n",
        defaults.build.entry.display()
    ));

    out.push_str("[scaffold]\n");
    out.push_str(&format!(
        "enable = {}             # Generate the destination project when missing\n",
        defaults.scaffold.enable
    ));
    out.push_str(&format!(
        "command = [{command}]   # Destination is appended\n\n"
    ));

    out.push_str("[watch]\n");
    out.push_str(&format!(
        "debounce_ms = {}         # Quiet period before changes are processed\n\n",
        defaults.watch.debounce_ms
    ));

    out.push_str("# Extra attribute renames, merged over the built-in table\n");
    out.push_str("[attributes]\n");
    out.push_str("# \"accept-charset\" = \"acceptCharset\"\n");
    out
}

/// Write the template to `path`, refusing to overwrite.
pub fn write_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }
    fs::write(path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}

/// `init` entry point. With `dry_run`, prints the template instead.
pub fn init_project(config: &Config, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    write_config(&config.config_path)?;
    log!("init"; "wrote {}", config.config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = test_parse_config(&generate_config_template());
        let defaults = Config::default();
        assert_eq!(config.build.source, defaults.build.source);
        assert_eq!(config.build.entry, defaults.build.entry);
        assert_eq!(config.scaffold.command, defaults.scaffold.command);
        assert_eq!(config.watch.debounce_ms, defaults.watch.debounce_ms);
        assert!(config.attributes.is_empty());
    }

    #[test]
    fn test_write_config_does_not_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("reactify.toml");
        write_config(&path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[build]"));

        fs::write(&path, "custom").unwrap();
        assert!(write_config(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom");
    }
}
