//! `convert` command: one document, route module untouched.

use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::config::Config;
use crate::log;
use crate::project::{self, scaffold};
use crate::transpile::is_document;
use crate::utils::path::{resolve_path, route::to_slash};

/// Convert `file`, given relative to the source directory or to cwd.
pub fn convert_file(config: &Config, file: &Path) -> Result<()> {
    project::check_source(config)?;

    let path = resolve_path(file, config.source_dir());
    let Some(relative) = config.source_relative(&path) else {
        bail!(
            "'{}' is not inside the source directory '{}'",
            file.display(),
            config.source_dir().display()
        );
    };
    if !is_document(&relative) {
        bail!("'{}' is not an .html document", file.display());
    }

    scaffold::ensure_destination(config)?;
    let written = project::convert_document(config, &config.rename_table(), &relative)
        .with_context(|| format!("Failed to convert '{}'", to_slash(&relative)))?;

    log!("convert"; "{} -> {}", to_slash(&relative), written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_convert_relative_to_source() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());
        fs::create_dir_all(config.source_dir().join("docs")).unwrap();
        fs::write(config.source_dir().join("docs/guide.html"), "<p>g</p>").unwrap();

        convert_file(&config, Path::new("docs/guide.html")).unwrap();
        assert!(config.output_dir().join("docs/Guide.js").exists());
    }

    #[test]
    fn test_convert_rejects_assets_and_outsiders() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());
        fs::create_dir_all(config.source_dir()).unwrap();
        fs::write(config.source_dir().join("main.css"), "a{}").unwrap();
        let outside = temp.path().join("outside.html");
        fs::write(&outside, "<p>o</p>").unwrap();

        assert!(convert_file(&config, Path::new("main.css")).is_err());
        assert!(convert_file(&config, &outside).is_err());
    }
}
