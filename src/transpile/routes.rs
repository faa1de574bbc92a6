//! Route derivation and the aggregate entry module.

use std::fmt::Write as _;
use std::path::Path;

use super::link::identifier_for;
use super::page_module_stem;
use super::react::{ENTRY_COMPONENT, ROUTE_IDENT_PREFIX};
use crate::utils::path::route::{join_normalized, to_slash};

/// Route of a document, given its directory and extension-less name.
///
/// `index` maps to its directory, and the root index to `/`.
///
/// # Examples
/// ```ignore
/// assert_eq!(route_path(Path::new(""), "index"), "/");
/// assert_eq!(route_path(Path::new("about"), "team"), "about/team");
/// assert_eq!(route_path(Path::new("blog"), "index"), "blog");
/// ```
pub fn route_path(relative_dir: &Path, stem: &str) -> String {
    let route = if stem == "index" {
        to_slash(relative_dir)
    } else {
        join_normalized(relative_dir, stem)
    };
    if route.is_empty() { "/".to_string() } else { route }
}

/// `path` attribute value for a route: rooted at `/`.
fn route_pattern(route: &str) -> String {
    if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{route}")
    }
}

/// One page registered for the entry module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub route_path: String,
    /// Import specifier of the generated module, e.g. `./about/Team`.
    pub module_path: String,
}

impl RouteEntry {
    /// Identifier the entry module imports this page under.
    pub fn identifier(&self) -> String {
        let bare = self.module_path.trim_start_matches("./");
        format!("{ROUTE_IDENT_PREFIX}{}", identifier_for(bare).trim_start_matches('_'))
    }
}

/// Routes accumulated over one batch pass.
///
/// Owned by the batch driver; [`RouteTable::flush`] consumes it, so a table
/// is flushed exactly once.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a non-entry document.
    pub fn add_entry(&mut self, relative_dir: &Path, stem: &str) {
        let dir = to_slash(relative_dir);
        let module = page_module_stem(relative_dir, stem);
        let module_path = if dir.is_empty() {
            format!("./{module}")
        } else {
            format!("./{dir}/{module}")
        };
        self.entries.push(RouteEntry {
            route_path: route_path(relative_dir, stem),
            module_path,
        });
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the aggregate entry module.
    ///
    /// Every page gets a route; a final catch-all renders the entry component.
    pub fn flush(self) -> String {
        let mut out = String::new();
        out.push_str("import React from \"react\";\n");
        out.push_str("import ReactDOM from \"react-dom/client\";\n");
        out.push_str("import { BrowserRouter, Routes, Route } from \"react-router-dom\";\n");
        let _ = writeln!(out, "import {ENTRY_COMPONENT} from \"./{ENTRY_COMPONENT}\";");
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "import {} from \"{}\";",
                entry.identifier(),
                entry.module_path
            );
        }

        out.push_str("\nconst root = ReactDOM.createRoot(document.getElementById(\"root\"));\n");
        out.push_str("root.render(\n  <BrowserRouter>\n    <Routes>\n");
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "      <Route path=\"{}\" element={{<{} />}} />",
                route_pattern(&entry.route_path),
                entry.identifier()
            );
        }
        let _ = writeln!(
            out,
            "      <Route path=\"*\" element={{<{ENTRY_COMPONENT} />}} />"
        );
        out.push_str("    </Routes>\n  </BrowserRouter>\n);\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path() {
        assert_eq!(route_path(Path::new(""), "index"), "/");
        assert_eq!(route_path(Path::new(""), "about"), "about");
        assert_eq!(route_path(Path::new("about"), "team"), "about/team");
        assert_eq!(route_path(Path::new("blog"), "index"), "blog");
        assert_eq!(route_path(Path::new("a/b"), "index"), "a/b");
    }

    #[test]
    fn test_add_entry() {
        let mut table = RouteTable::new();
        table.add_entry(Path::new("about"), "team");
        table.add_entry(Path::new(""), "contact");
        assert_eq!(
            table.entries(),
            [
                RouteEntry {
                    route_path: "about/team".into(),
                    module_path: "./about/Team".into(),
                },
                RouteEntry {
                    route_path: "contact".into(),
                    module_path: "./Contact".into(),
                },
            ]
        );
        assert_eq!(table.entries()[0].identifier(), "Page_about_Team");
        assert_eq!(table.entries()[1].identifier(), "Page_Contact");
    }

    #[test]
    fn test_flush_lists_routes_and_fallback() {
        let mut table = RouteTable::new();
        table.add_entry(Path::new("about"), "team");
        table.add_entry(Path::new("blog"), "index");
        let module = table.flush();

        assert!(module.contains("import App from \"./App\";"));
        assert!(module.contains("import Page_about_Team from \"./about/Team\";"));
        assert!(module.contains("import Page_blog_Index from \"./blog/Index\";"));
        assert!(module.contains("<Route path=\"/about/team\" element={<Page_about_Team />} />"));
        assert!(module.contains("<Route path=\"/blog\" element={<Page_blog_Index />} />"));

        // Fallback is the last route
        let fallback = module.find("<Route path=\"*\" element={<App />} />").unwrap();
        let last_page = module.rfind("Page_blog_Index />").unwrap();
        assert!(fallback > last_page);
    }

    #[test]
    fn test_root_app_page_gets_own_module() {
        let mut table = RouteTable::new();
        table.add_entry(Path::new(""), "app");
        let entry = &table.entries()[0];
        assert_eq!(entry.module_path, "./AppPage");
        assert_eq!(entry.route_path, "app");

        let module = table.flush();
        assert!(module.contains("import Page_AppPage from \"./AppPage\";"));
        assert!(module.contains("import App from \"./App\";"));
    }

    #[test]
    fn test_flush_empty_table() {
        let module = RouteTable::new().flush();
        assert_eq!(module.matches("<Route ").count(), 1);
    }
}
