//! Link classification and import bookkeeping.
//!
//! A link is internal when the file it names exists under the source root
//! (directly, or as a directory holding `index.html`). Internal asset links
//! become module imports; everything else is left untouched.

use std::path::{Path, PathBuf};

use crate::utils::path::route::{is_external_link, join_normalized};

/// Document name looked up when a link names a directory.
pub const INDEX_DOCUMENT: &str = "index.html";

/// Outcome of resolving one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No link given.
    Empty,
    /// Not found under the source root; keep the literal link.
    External(String),
    /// Bound to an imported variable.
    Internal(String),
    /// Import emitted, no attribute value retained.
    ImportOnly,
}

impl Resolution {
    /// Value to write back into the attribute slot, if any.
    ///
    /// Internal references become a `{ident}` placeholder. It is string-shaped
    /// here and unquoted when the module is assembled.
    pub fn attribute_value(&self) -> Option<String> {
        match self {
            Self::Empty | Self::ImportOnly => None,
            Self::External(link) => Some(link.clone()),
            Self::Internal(ident) => Some(placeholder(ident)),
        }
    }
}

/// Placeholder written into an attribute for an imported variable.
pub fn placeholder(ident: &str) -> String {
    format!("{{{ident}}}")
}

/// Import statements and bound variables accumulated for one document.
///
/// Kept in discovery order, duplicates included.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportLedger {
    pub imports: Vec<String>,
    pub variables: Vec<String>,
}

/// Classifies links against the source tree.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    source_root: &'a Path,
}

impl<'a> LinkResolver<'a> {
    pub fn new(source_root: &'a Path) -> Self {
        Self { source_root }
    }

    pub fn source_root(&self) -> &Path {
        self.source_root
    }

    /// Source-relative path a link points to, `/`-separated.
    pub fn target(&self, link: &str, relative_dir: &Path) -> String {
        join_normalized(relative_dir, link)
    }

    /// Absolute filesystem location of a link target.
    fn locate(&self, link: &str, relative_dir: &Path) -> PathBuf {
        self.source_root.join(self.target(link, relative_dir))
    }

    /// Existence test: the path itself or its `index.html`.
    pub fn exists(&self, link: &str, relative_dir: &Path) -> bool {
        if link.is_empty() || is_external_link(link) || link.starts_with('#') {
            return false;
        }
        let path = self.locate(link, relative_dir);
        path.exists() || path.join(INDEX_DOCUMENT).exists()
    }

    /// Resolve `link` found in a document under `relative_dir`.
    ///
    /// Internal links record an import in `ledger`; `import_only` suppresses
    /// the variable binding.
    pub fn resolve(
        &self,
        link: Option<&str>,
        relative_dir: &Path,
        import_only: bool,
        ledger: &mut ImportLedger,
    ) -> Resolution {
        let Some(link) = link.filter(|l| !l.is_empty()) else {
            return Resolution::Empty;
        };

        if !self.exists(link, relative_dir) {
            return Resolution::External(link.to_string());
        }

        let specifier = import_specifier(link, relative_dir);
        if import_only {
            ledger.imports.push(format!("import \"{specifier}\";"));
            return Resolution::ImportOnly;
        }

        let ident = identifier_for(link);
        ledger
            .imports
            .push(format!("import {ident} from \"{specifier}\";"));
        ledger.variables.push(ident.clone());
        Resolution::Internal(ident)
    }
}

/// Identifier derived from a link: every non-alphanumeric becomes `_`.
///
/// A leading digit gets an extra `_` so the result stays a valid identifier.
pub fn identifier_for(link: &str) -> String {
    let mut ident: String = link
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Module specifier for an import written next to the document.
///
/// Root-relative links climb out of the document's directory.
fn import_specifier(link: &str, relative_dir: &Path) -> String {
    if let Some(rooted) = link.strip_prefix('/') {
        let depth = relative_dir.components().count();
        return match depth {
            0 => format!("./{rooted}"),
            _ => format!("{}{rooted}", "../".repeat(depth)),
        };
    }
    if link.starts_with('.') {
        link.to_string()
    } else {
        format!("./{link}")
    }
}
