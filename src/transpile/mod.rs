//! Markup document -> component module conversion.
//!
//! # Module Structure
//!
//! ```text
//! transpile/
//! ├── attributes   # AttributeRenameTable + generic attribute pass
//! ├── link         # LinkResolver (internal/external classification, imports)
//! ├── mapper       # TagAttributeMapper (per-tag handlers)
//! ├── assembler    # PageAssembler (document edits + module serialization)
//! ├── routes       # RouteTable (aggregate entry module)
//! ├── react        # target framework names
//! └── error        # TranspileError
//! ```
//!
//! Per file: parse -> extract tag records -> map -> assemble -> write.

pub mod assembler;
pub mod attributes;
mod error;
pub mod link;
pub mod mapper;
pub mod react;
pub mod routes;

use std::fs;
use std::path::{Path, PathBuf};

pub use attributes::AttributeRenameTable;
pub use error::TranspileError;
pub use routes::RouteTable;

use assembler::assemble;
use link::{LinkResolver, identifier_for};
use mapper::{TagAttributeMapper, extract_tag_records};
use react::{ENTRY_COMPONENT, MODULE_EXT, PAGE_SUFFIX, ROUTES_MODULE};

use crate::dom::Document;
use crate::utils::path::route::to_slash;

/// Whether a path is a markup document.
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

/// Output base name for a document stem: first character upper-cased.
pub fn module_stem(stem: &str) -> String {
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Module base name of a non-entry page in `relative_dir`.
///
/// Root pages named like the entry or route modules (`app.html`,
/// `index.html` when another page is the entry) get a `Page` suffix.
/// The check ignores case, since `App.js` and `APP.js` are the same file on
/// case-insensitive filesystems.
pub fn page_module_stem(relative_dir: &Path, stem: &str) -> String {
    let module = module_stem(stem);
    let routes_stem = ROUTES_MODULE.trim_end_matches(".js");
    let reserved = module.eq_ignore_ascii_case(ENTRY_COMPONENT)
        || module.eq_ignore_ascii_case(routes_stem);
    if relative_dir.as_os_str().is_empty() && reserved {
        format!("{module}{PAGE_SUFFIX}")
    } else {
        module
    }
}

/// Everything one file's conversion needs. Lives for that file only.
#[derive(Debug, Clone)]
pub struct TranspileContext<'a> {
    pub source_root: &'a Path,
    /// Directory receiving generated modules (`<destination>/src`).
    pub output_root: &'a Path,
    /// Document path relative to `source_root`.
    pub relative_path: PathBuf,
    pub is_entry: bool,
}

impl<'a> TranspileContext<'a> {
    pub fn new(
        source_root: &'a Path,
        output_root: &'a Path,
        relative_path: impl Into<PathBuf>,
        is_entry: bool,
    ) -> Self {
        Self {
            source_root,
            output_root,
            relative_path: relative_path.into(),
            is_entry,
        }
    }

    /// Directory of the document, relative to the source root.
    pub fn relative_dir(&self) -> &Path {
        self.relative_path.parent().unwrap_or(Path::new(""))
    }

    /// File name without extension.
    pub fn stem(&self) -> &str {
        self.relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    pub fn function_name(&self) -> String {
        if self.is_entry {
            ENTRY_COMPONENT.to_string()
        } else {
            identifier_for(&page_module_stem(self.relative_dir(), self.stem()))
        }
    }

    /// Where the generated module is written.
    pub fn output_path(&self) -> PathBuf {
        if self.is_entry {
            return self.output_root.join(format!("{ENTRY_COMPONENT}.{MODULE_EXT}"));
        }
        self.output_root
            .join(self.relative_dir())
            .join(format!(
                "{}.{MODULE_EXT}",
                page_module_stem(self.relative_dir(), self.stem())
            ))
    }
}

/// A converted document.
#[derive(Debug, Clone)]
pub struct Transpiled {
    pub output: PathBuf,
    pub module: String,
}

/// Convert one document to module text.
pub fn transpile(
    ctx: &TranspileContext<'_>,
    table: &AttributeRenameTable,
) -> Result<Transpiled, TranspileError> {
    let source = ctx.source_root.join(&ctx.relative_path);
    let html = fs::read_to_string(&source).map_err(|e| TranspileError::io(&source, e))?;
    let module = transpile_str(&html, ctx, table)?;

    crate::debug!("transpile"; "{} -> {}", to_slash(&ctx.relative_path), ctx.function_name());
    Ok(Transpiled {
        output: ctx.output_path(),
        module,
    })
}

/// Convert markup text as if it were the document described by `ctx`.
pub fn transpile_str(
    html: &str,
    ctx: &TranspileContext<'_>,
    table: &AttributeRenameTable,
) -> Result<String, TranspileError> {
    let file = ctx.relative_path.clone();
    let mut doc = Document::parse(html).map_err(|e| TranspileError::Parse {
        path: file.clone(),
        message: e.to_string(),
    })?;

    let records = extract_tag_records(&doc);
    let mapper = TagAttributeMapper::new(table, LinkResolver::new(ctx.source_root));
    let mapping = mapper.map(&records, ctx.relative_dir());
    let assembled = assemble(&mut doc, &records, mapping, &ctx.function_name(), &file)?;
    Ok(assembled.render())
}

/// Convert a document and write its module.
pub fn transpile_file(
    ctx: &TranspileContext<'_>,
    table: &AttributeRenameTable,
) -> Result<PathBuf, TranspileError> {
    let Transpiled { output, module } = transpile(ctx, table)?;
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| TranspileError::io(parent, e))?;
    }
    fs::write(&output, module).map_err(|e| TranspileError::io(&output, e))?;
    Ok(output)
}
