//! Batch driver: one full pass over a source tree.
//!
//! # Module Structure
//!
//! ```text
//! project/
//! ├── assets     # tree walking, verbatim copies
//! ├── scaffold   # destination project preparation
//! └── mod.rs     # run_batch, convert_document (this file)
//! ```
//!
//! A pass validates both roots, converts every document, copies every asset,
//! then writes the route module once. A failing document is recorded and the
//! pass moves on; only root, entry and scaffold problems abort it.

pub mod assets;
pub mod scaffold;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::{FileCategory, is_shutdown};
use crate::transpile::react::ROUTES_MODULE;
use crate::transpile::{
    AttributeRenameTable, RouteTable, TranspileContext, TranspileError, transpile_file,
};
use crate::utils::path::route::to_slash;
use crate::{debug, log};

/// One document that could not be converted.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: TranspileError,
}

/// Outcome of a batch pass.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub converted: usize,
    pub copied: usize,
    pub routes: usize,
    pub failures: Vec<Failure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut line = format!(
            "converted {} document{}, copied {} asset{}",
            self.converted,
            plural(self.converted),
            self.copied,
            plural(self.copied)
        );
        if !self.failures.is_empty() {
            line.push_str(&format!(", {} failed", self.failures.len()));
        }
        line
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Check that the source root exists.
pub fn check_source(config: &Config) -> Result<(), TranspileError> {
    let source = config.source_dir();
    if !source.is_dir() {
        return Err(TranspileError::Configuration {
            role: "source",
            path: source.to_path_buf(),
        });
    }
    Ok(())
}

/// Run one full pass.
pub fn run_batch(config: &Config) -> Result<BuildReport, TranspileError> {
    check_source(config)?;
    scaffold::ensure_destination(config)?;

    let entry = config.entry_path();
    if !entry.is_file() {
        return Err(TranspileError::MissingEntryPoint { path: entry });
    }

    let source = config.source_dir();
    let output = config.output_dir();
    let table = config.rename_table();
    let mut routes = RouteTable::new();
    let mut report = BuildReport::default();

    for path in assets::collect_all_files(source) {
        if is_shutdown() {
            break;
        }
        let Ok(relative) = path.strip_prefix(source) else {
            continue;
        };

        match FileCategory::from_path(relative) {
            FileCategory::Document => {
                let is_entry = relative == config.entry();
                let ctx = TranspileContext::new(source, &output, relative, is_entry);
                match transpile_file(&ctx, &table) {
                    Ok(written) => {
                        debug!("build"; "{} -> {}", to_slash(relative), written.display());
                        report.converted += 1;
                        if !is_entry {
                            routes.add_entry(ctx.relative_dir(), ctx.stem());
                        }
                    }
                    Err(error) => record_failure(&mut report, relative, error),
                }
            }
            FileCategory::Asset => match assets::copy_asset(&path, &output.join(relative)) {
                Ok(true) => report.copied += 1,
                Ok(false) => {}
                Err(error) => record_failure(&mut report, relative, error),
            },
        }
    }

    report.routes = routes.len();
    let routes_path = output.join(ROUTES_MODULE);
    fs::write(&routes_path, routes.flush()).map_err(|e| TranspileError::io(&routes_path, e))?;

    log!("build"; "{}", report.summary());
    Ok(report)
}

fn record_failure(report: &mut BuildReport, relative: &Path, error: TranspileError) {
    log!("error"; "{}: {}", to_slash(relative), error);
    report.failures.push(Failure {
        path: relative.to_path_buf(),
        error,
    });
}

/// Convert one document, leaving the route module untouched.
///
/// `relative` is the document path relative to the source root.
pub fn convert_document(
    config: &Config,
    table: &AttributeRenameTable,
    relative: &Path,
) -> Result<PathBuf, TranspileError> {
    let output = config.output_dir();
    let is_entry = relative == config.entry();
    let ctx = TranspileContext::new(config.source_dir(), &output, relative, is_entry);
    transpile_file(&ctx, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> (TempDir, Config) {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());
        let site = config.source_dir().to_path_buf();
        write(
            &site,
            "index.html",
            "<!DOCTYPE html><html><head><title>Home</title><link rel=\"stylesheet\" href=\"main.css\"></head>\
             <body><a href=\"about.html\">About</a><img src=\"img/logo.png\"></body></html>",
        );
        write(&site, "about.html", "<html><body><h1 class=\"t\">About</h1></body></html>");
        write(&site, "blog/index.html", "<p>blog</p>");
        write(&site, "main.css", "body { margin: 0; }");
        write(&site, "img/logo.png", "png");
        (temp, config)
    }

    #[test]
    fn test_full_pass() {
        let (_temp, config) = project();
        let report = run_batch(&config).unwrap();

        assert!(report.is_success());
        assert_eq!(report.converted, 3);
        assert_eq!(report.copied, 2);
        assert_eq!(report.routes, 2);

        let out = config.output_dir();
        let app = fs::read_to_string(out.join("App.js")).unwrap();
        assert!(app.contains("function App() {"));
        assert!(app.contains("<Link to=\"about\">About</Link>"));
        assert!(app.contains("import \"./main.css\";"));
        assert!(app.contains("<img src={img_logo_png} />"));
        assert!(app.contains("<Helmet><title>Home</title></Helmet>"));

        let about = fs::read_to_string(out.join("About.js")).unwrap();
        assert!(about.contains("<h1 className=\"t\">About</h1>"));
        assert!(out.join("blog/Index.js").exists());
        assert!(out.join("img/logo.png").exists());
        assert!(out.join("main.css").exists());

        let index = fs::read_to_string(out.join("index.js")).unwrap();
        assert!(index.contains("<Route path=\"/about\" element={<Page_About />} />"));
        assert!(index.contains("<Route path=\"/blog\" element={<Page_blog_Index />} />"));
        assert_eq!(index.matches("path=\"*\"").count(), 1);
        assert!(!index.contains("import Page_App"));
    }

    #[test]
    fn test_app_page_keeps_entry_module() {
        let (_temp, config) = project();
        write(config.source_dir(), "app.html", "<p>app page</p>");
        let report = run_batch(&config).unwrap();
        assert!(report.is_success());

        let out = config.output_dir();
        let app = fs::read_to_string(out.join("App.js")).unwrap();
        assert!(app.contains("<Link to=\"about\">About</Link>"));
        let page = fs::read_to_string(out.join("AppPage.js")).unwrap();
        assert!(page.contains("function AppPage() {"));

        let index = fs::read_to_string(out.join("index.js")).unwrap();
        assert!(index.contains("import Page_AppPage from \"./AppPage\";"));
    }

    #[test]
    fn test_second_pass_skips_fresh_assets() {
        let (_temp, config) = project();
        run_batch(&config).unwrap();
        let report = run_batch(&config).unwrap();
        assert_eq!(report.copied, 0);
        assert_eq!(report.converted, 3);
    }

    #[test]
    fn test_missing_entry_point() {
        let (_temp, config) = project();
        fs::remove_file(config.entry_path()).unwrap();
        assert!(matches!(
            run_batch(&config),
            Err(TranspileError::MissingEntryPoint { .. })
        ));
    }

    #[test]
    fn test_missing_source_root() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());
        assert!(matches!(
            run_batch(&config),
            Err(TranspileError::Configuration { role: "source", .. })
        ));
    }

    #[test]
    fn test_convert_document_leaves_routes_alone() {
        let (_temp, config) = project();
        fs::create_dir_all(config.output_dir()).unwrap();
        let table = config.rename_table();
        let written = convert_document(&config, &table, Path::new("about.html")).unwrap();

        assert_eq!(written, config.output_dir().join("About.js"));
        assert!(!config.output_dir().join("index.js").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_document_is_isolated() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, config) = project();
        let broken = config.source_dir().join("broken.html");
        fs::write(&broken, "<p>x</p>").unwrap();
        fs::set_permissions(&broken, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(&broken).is_ok() {
            // Running as root; permissions are not enforced
            return;
        }

        let report = run_batch(&config).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("broken.html"));
        assert_eq!(report.converted, 3);
        assert!(config.output_dir().join("index.js").exists());
    }
}
