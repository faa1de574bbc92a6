//! Tag/attribute mapping.
//!
//! Every tag goes through the generic attribute pass, then through the
//! handler registered for its kind (if any). The result sequence is
//! positionally correlated with the extracted tag records.

use std::path::Path;

use super::attributes::AttributeRenameTable;
use super::is_document;
use super::link::{INDEX_DOCUMENT, ImportLedger, LinkResolver};
use super::react::{IMPORT_NAV, NAV_ATTR};
use super::routes::route_path;
use crate::dom::{Attributes, Document, NodeId};
use crate::utils::path::route::{is_external_link, join_normalized, split_path_suffix};

/// One extracted tag, in document order.
///
/// `node` ties the record back to the live document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub node: NodeId,
    pub name: String,
    pub attrs: Attributes,
}

/// Flat, document-order extraction of every element.
pub fn extract_tag_records(doc: &Document) -> Vec<TagRecord> {
    doc.elements()
        .into_iter()
        .filter_map(|node| {
            let element = doc.element(node)?;
            Some(TagRecord {
                node,
                name: element.name.clone(),
                attrs: element.attrs.clone(),
            })
        })
        .collect()
}

/// What to do with one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAction {
    /// Keep the tag with these attributes.
    Rewrite(Attributes),
    /// Remove the whole node.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingResult {
    /// Tag name of the record this result belongs to.
    pub tag: String,
    pub action: TagAction,
}

/// Mapper output for one document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MappingOutput {
    pub results: Vec<MappingResult>,
    pub ledger: ImportLedger,
}

/// Tag kinds with dedicated handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagHandler {
    Hyperlink,
    Image,
    Script,
    Style,
    StylesheetLink,
}

impl TagHandler {
    fn dispatch(name: &str, attrs: &Attributes) -> Option<Self> {
        match name {
            "a" => Some(Self::Hyperlink),
            "img" => Some(Self::Image),
            "script" => Some(Self::Script),
            "style" => Some(Self::Style),
            "link" if is_stylesheet(attrs) => Some(Self::StylesheetLink),
            _ => None,
        }
    }
}

fn is_stylesheet(attrs: &Attributes) -> bool {
    attrs
        .get("rel")
        .is_some_and(|rel| rel.trim().eq_ignore_ascii_case("stylesheet"))
}

/// Maps the tags of exactly one document.
///
/// Consumed by [`TagAttributeMapper::map`], so accumulators never leak
/// between documents.
pub struct TagAttributeMapper<'a> {
    table: &'a AttributeRenameTable,
    resolver: LinkResolver<'a>,
    ledger: ImportLedger,
    /// Navigation import already emitted for this document.
    navigation_imported: bool,
}

impl<'a> TagAttributeMapper<'a> {
    pub fn new(table: &'a AttributeRenameTable, resolver: LinkResolver<'a>) -> Self {
        Self {
            table,
            resolver,
            ledger: ImportLedger::default(),
            navigation_imported: false,
        }
    }

    /// Map all records of a document located in `relative_dir`.
    pub fn map(mut self, records: &[TagRecord], relative_dir: &Path) -> MappingOutput {
        let results = records
            .iter()
            .map(|record| MappingResult {
                tag: record.name.clone(),
                action: self.map_tag(record, relative_dir),
            })
            .collect();

        MappingOutput {
            results,
            ledger: self.ledger,
        }
    }

    fn map_tag(&mut self, record: &TagRecord, relative_dir: &Path) -> TagAction {
        let attrs = self.table.rewrite(&record.attrs);

        match TagHandler::dispatch(&record.name, &attrs) {
            None => TagAction::Rewrite(attrs),
            Some(TagHandler::Hyperlink) => self.hyperlink(attrs, relative_dir),
            Some(TagHandler::Image) => self.asset_source(attrs, relative_dir),
            Some(TagHandler::Script) => {
                // Inline bodies are relocated by the assembler
                if attrs.contains("src") {
                    self.asset_source(attrs, relative_dir)
                } else {
                    TagAction::Delete
                }
            }
            Some(TagHandler::Style) => TagAction::Delete,
            Some(TagHandler::StylesheetLink) => {
                let href = attrs.get("href");
                self.resolver
                    .resolve(href, relative_dir, true, &mut self.ledger);
                TagAction::Delete
            }
        }
    }

    fn hyperlink(&mut self, mut attrs: Attributes, relative_dir: &Path) -> TagAction {
        let Some(route) = attrs
            .get("href")
            .and_then(|href| self.internal_route(href, relative_dir))
        else {
            return TagAction::Rewrite(attrs);
        };

        attrs.replace_key("href", NAV_ATTR, route);
        if !self.navigation_imported {
            self.ledger.imports.push(IMPORT_NAV.to_string());
            self.navigation_imported = true;
        }
        TagAction::Rewrite(attrs)
    }

    /// Route for an href naming a document (or a directory with an index).
    ///
    /// Only pages count: an href to an existing asset (`report.pdf`) stays a
    /// plain anchor, since no route renders it. The `?query`/`#fragment`
    /// suffix is carried over to the route.
    fn internal_route(&self, href: &str, relative_dir: &Path) -> Option<String> {
        let (path, suffix) = split_path_suffix(href);
        if path.is_empty() || is_external_link(path) {
            return None;
        }

        let target = join_normalized(relative_dir, path);
        let location = self.resolver.source_root().join(&target);
        let target = Path::new(&target);

        let route = if location.is_file() && is_document(&location) {
            let stem = target.file_stem()?.to_str()?;
            route_path(target.parent().unwrap_or(Path::new("")), stem)
        } else if location.join(INDEX_DOCUMENT).is_file() {
            route_path(target, "index")
        } else {
            return None;
        };

        Some(format!("{route}{suffix}"))
    }

    fn asset_source(&mut self, mut attrs: Attributes, relative_dir: &Path) -> TagAction {
        let resolution = self
            .resolver
            .resolve(attrs.get("src"), relative_dir, false, &mut self.ledger);
        if let Some(value) = resolution.attribute_value() {
            attrs.set("src", value);
        }
        TagAction::Rewrite(attrs)
    }
}
