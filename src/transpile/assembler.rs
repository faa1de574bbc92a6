//! Page assembly: applies mapping results to the live document and
//! serializes one output module.

use std::fmt::Write as _;
use std::path::Path;

use super::error::TranspileError;
use super::link::placeholder;
use super::mapper::{MappingOutput, TagAction, TagRecord};
use super::react::{
    HEAD_ELEMENT, IMPORT_BASE, IMPORT_EFFECT, IMPORT_HEAD, NAV_ATTR, NAV_ELEMENT,
};
use crate::dom::{Document, NodeId};
use crate::utils::html::escape_template_literal;

/// A fully assembled page, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledModule {
    pub function_name: String,
    /// Import lines in emission order, not deduplicated.
    pub imports: Vec<String>,
    /// Concatenated inline script bodies, run once after mount.
    pub effect: Option<String>,
    /// Head section followed by the body's inner markup.
    pub content: String,
}

impl AssembledModule {
    /// Serialize as a module: imports, component function, default export.
    pub fn render(&self) -> String {
        let name = &self.function_name;
        let mut out = String::new();
        for line in &self.imports {
            out.push_str(line);
            out.push('\n');
        }

        let _ = writeln!(out, "\nfunction {name}() {{");
        if let Some(effect) = &self.effect {
            out.push_str("  useEffect(() => {\n");
            out.push_str(effect);
            out.push_str("\n  }, []);\n\n");
        }
        out.push_str("  return (\n    <>\n");
        out.push_str(&self.content);
        out.push_str("\n    </>\n  );\n}\n");
        let _ = writeln!(out, "\nexport default {name};");
        out
    }
}

/// Assemble one document.
///
/// `records` and `mapping.results` must correlate 1:1 by position and tag
/// name; any mismatch aborts with [`TranspileError::Consistency`].
pub fn assemble(
    doc: &mut Document,
    records: &[TagRecord],
    mapping: MappingOutput,
    function_name: &str,
    file: &Path,
) -> Result<AssembledModule, TranspileError> {
    // Captured before any node is removed
    let styles = extract_styles(doc);
    let scripts = extract_inline_scripts(doc);

    apply_results(doc, records, &mapping, file)?;

    let head = relocate_head(doc, &styles);
    let mut content = head.map(|h| doc.outer_jsx(h)).unwrap_or_default();
    content.push_str(&body_content(doc, head));

    // Attribute slots were string-typed; turn placeholders back into references
    for variable in &mapping.ledger.variables {
        let reference = placeholder(variable);
        content = content.replace(&format!("\"{reference}\""), &reference);
    }

    let effect = (!scripts.is_empty()).then(|| scripts.join("\n"));

    let mut imports = Vec::with_capacity(mapping.ledger.imports.len() + 2);
    imports.push(if effect.is_some() { IMPORT_EFFECT } else { IMPORT_BASE }.to_string());
    if head.is_some() {
        imports.push(IMPORT_HEAD.to_string());
    }
    imports.extend(mapping.ledger.imports);

    Ok(AssembledModule {
        function_name: function_name.to_string(),
        imports,
        effect,
        content,
    })
}

fn extract_styles(doc: &Document) -> Vec<String> {
    doc.find_all("style")
        .into_iter()
        .map(|id| doc.text_content(id))
        .filter(|css| !css.trim().is_empty())
        .collect()
}

fn extract_inline_scripts(doc: &Document) -> Vec<String> {
    doc.find_all("script")
        .into_iter()
        .filter(|&id| doc.attrs(id).is_some_and(|a| !a.contains("src")))
        .map(|id| doc.text_content(id))
        .filter(|js| !js.trim().is_empty())
        .collect()
}

/// Walk records and results in lockstep and edit the document.
fn apply_results(
    doc: &mut Document,
    records: &[TagRecord],
    mapping: &MappingOutput,
    file: &Path,
) -> Result<(), TranspileError> {
    let results = &mapping.results;
    if records.len() != results.len() {
        let index = records.len().min(results.len());
        return Err(TranspileError::Consistency {
            file: file.to_path_buf(),
            index,
            expected: records.get(index).map(|r| r.name.clone()).unwrap_or_default(),
            found: results.get(index).map(|r| r.tag.clone()).unwrap_or_default(),
        });
    }

    for (index, (record, result)) in records.iter().zip(results).enumerate() {
        let live = doc.tag(record.node).unwrap_or_default();
        if record.name != result.tag || !live.eq_ignore_ascii_case(&record.name) {
            return Err(TranspileError::Consistency {
                file: file.to_path_buf(),
                index,
                expected: record.name.clone(),
                found: result.tag.clone(),
            });
        }

        match &result.action {
            TagAction::Delete => doc.detach(record.node),
            TagAction::Rewrite(attrs) => {
                let navigates = record.name == "a" && attrs.contains(NAV_ATTR);
                doc.set_attrs(record.node, attrs.clone());
                if navigates {
                    doc.rename(record.node, NAV_ELEMENT);
                }
            }
        }
    }
    Ok(())
}

/// Retag (or synthesize) the head section and embed extracted styles.
fn relocate_head(doc: &mut Document, styles: &[String]) -> Option<NodeId> {
    let head = match doc.find("head") {
        Some(head) => {
            doc.rename(head, HEAD_ELEMENT);
            head
        }
        None if !styles.is_empty() => doc.create_element(HEAD_ELEMENT),
        None => return None,
    };

    for css in styles {
        let style = doc.create_element("style");
        doc.append_child(head, style);
        doc.append_verbatim(style, format!("{{`{}`}}", escape_template_literal(css)));
    }
    Some(head)
}

/// Inner markup of the body; without a body, everything but the head.
fn body_content(doc: &Document, head: Option<NodeId>) -> String {
    if let Some(body) = doc.find("body") {
        return doc.inner_jsx(body);
    }

    let top = match doc.find("html") {
        Some(html) => doc.children(html),
        None => doc.roots(),
    };
    top.iter()
        .filter(|&&id| Some(id) != head)
        .map(|&id| doc.outer_jsx(id))
        .collect()
}
