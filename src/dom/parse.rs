//! Markup parsing with tl.
//!
//! tl reads `<script>`/`<style>` bodies as markup, so those bodies are cut out
//! before parsing and reattached in document order.

use std::collections::VecDeque;

use super::{Attributes, Document, Element, NodeId, NodeKind};
use crate::utils::html::{is_raw_text_element, is_void_element};

pub(super) fn parse_document(html: &str) -> Result<Document, tl::ParseError> {
    let (stripped, bodies) = split_raw_text(html);
    let dom = tl::parse(&stripped, tl::ParserOptions::default())?;

    let mut builder = Builder {
        parser: dom.parser(),
        doc: Document::default(),
        bodies,
    };
    for handle in dom.children() {
        builder.copy_node(*handle, None, false);
    }
    Ok(builder.doc)
}

/// Remove the bodies of raw text elements.
///
/// Returns the markup with every `<script>`/`<style>` emptied, and the bodies
/// in the order their opening tags appear. Comments are skipped.
fn split_raw_text(html: &str) -> (String, VecDeque<String>) {
    // ASCII lowering keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut bodies = VecDeque::new();
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find('<') {
        let start = pos + offset;

        if lower[start..].starts_with("<!--") {
            let end = lower[start..]
                .find("-->")
                .map_or(html.len(), |i| start + i + 3);
            out.push_str(&html[pos..end]);
            pos = end;
            continue;
        }

        let Some(name) = raw_text_tag_at(&lower, start) else {
            out.push_str(&html[pos..start + 1]);
            pos = start + 1;
            continue;
        };

        let open_end = open_tag_end(&lower, start);
        out.push_str(&html[pos..open_end]);
        pos = open_end;

        if lower[..open_end].ends_with("/>") {
            bodies.push_back(String::new());
            continue;
        }

        let close = format!("</{name}");
        let body_end = lower[open_end..]
            .find(&close)
            .map_or(html.len(), |i| open_end + i);
        bodies.push_back(html[open_end..body_end].to_string());
        pos = body_end;
        if body_end == html.len() {
            out.push_str(&close);
            out.push('>');
        }
    }

    out.push_str(&html[pos..]);
    (out, bodies)
}

/// Name of the raw text element opened at `start`, if any.
fn raw_text_tag_at(lower: &str, start: usize) -> Option<&'static str> {
    let rest = &lower[start + 1..];
    ["script", "style"].into_iter().find(|name| {
        rest.strip_prefix(name).is_some_and(|after| {
            after
                .bytes()
                .next()
                .is_none_or(|b| b.is_ascii_whitespace() || b == b'>' || b == b'/')
        })
    })
}

/// Byte offset just past the `>` closing the tag opened at `start`.
///
/// Quoted attribute values may contain `>`.
fn open_tag_end(lower: &str, start: usize) -> usize {
    let mut quote = None;
    for (i, b) in lower.bytes().enumerate().skip(start) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return i + 1,
            _ => {}
        }
    }
    lower.len()
}

struct Builder<'p, 'a> {
    parser: &'p tl::Parser<'a>,
    doc: Document,
    bodies: VecDeque<String>,
}

impl Builder<'_, '_> {
    /// Copy a tl node (and its subtree) into the arena.
    ///
    /// `foreign` is set inside `<svg>`/`<math>`, where attribute names keep
    /// their case (`viewBox`).
    fn copy_node(&mut self, handle: tl::NodeHandle, parent: Option<NodeId>, foreign: bool) {
        let parser = self.parser;
        let Some(node) = handle.get(parser) else {
            return;
        };

        match node {
            tl::Node::Tag(tag) => {
                let name = tag.name().as_utf8_str().to_lowercase();
                // <!DOCTYPE ...> and <?xml ...?> are dropped, keeping anything nested under them
                if name.starts_with('!') || name.starts_with('?') {
                    for child in tag.children().top().iter() {
                        self.copy_node(*child, parent, foreign);
                    }
                    return;
                }

                let foreign = foreign || matches!(name.as_str(), "svg" | "math");
                let mut attrs = Attributes::new();
                for (key, value) in tag.attributes().iter() {
                    let key: &str = key.as_ref();
                    let key = if foreign {
                        key.to_string()
                    } else {
                        key.to_ascii_lowercase()
                    };
                    attrs.set_raw(key, value.map(|v| v.to_string()));
                }

                let raw_text = is_raw_text_element(&name);
                let void = is_void_element(&name);
                let id = self
                    .doc
                    .push(NodeKind::Element(Element { name, attrs }), parent);

                if raw_text {
                    let content = self.bodies.pop_front().unwrap_or_default();
                    if !content.is_empty() {
                        self.doc.push(NodeKind::Text(content), Some(id));
                    }
                    return;
                }

                // tl only knows lowercase void tags; `<LINK><IMG>` nests the image
                let child_parent = if void { parent } else { Some(id) };
                for child in tag.children().top().iter() {
                    self.copy_node(*child, child_parent, foreign);
                }
            }
            tl::Node::Raw(bytes) => {
                let text = bytes.as_utf8_str().to_string();
                if !text.is_empty() {
                    self.doc.push(NodeKind::Text(text), parent);
                }
            }
            tl::Node::Comment(bytes) => {
                let raw = bytes.as_utf8_str();
                let body = raw
                    .trim()
                    .trim_start_matches("<!--")
                    .trim_end_matches("-->")
                    .trim()
                    .to_string();
                self.doc.push(NodeKind::Comment(body), parent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let doc = Document::parse(
            "<!DOCTYPE html><html><head><title>T</title></head><body><p>x</p></body></html>",
        )
        .unwrap();
        let names: Vec<_> = doc
            .elements()
            .into_iter()
            .filter_map(|id| doc.tag(id))
            .collect();
        assert_eq!(names, ["html", "head", "title", "body", "p"]);
    }

    #[test]
    fn test_parse_attributes() {
        let doc = Document::parse("<img src=\"logo.png\" alt=\"Logo\">").unwrap();
        let img = doc.find("img").unwrap();
        let attrs = doc.attrs(img).unwrap();
        assert_eq!(attrs.get("src"), Some("logo.png"));
        assert_eq!(attrs.get("alt"), Some("Logo"));
    }

    #[test]
    fn test_parse_lowercases_tag_names() {
        let doc = Document::parse("<DIV>x</DIV>").unwrap();
        assert_eq!(doc.tag(doc.roots()[0]), Some("div"));
    }

    #[test]
    fn test_parse_script_body() {
        let doc = Document::parse("<script>console.log('hi');</script>").unwrap();
        let script = doc.find("script").unwrap();
        assert_eq!(doc.text_content(script), "console.log('hi');");
    }

    #[test]
    fn test_parse_script_with_comparisons() {
        let doc = Document::parse(
            "<p>x</p><script>for (i=0;i<n;i++) { if (a<b && c>d) go(); }</script><p>after</p>",
        )
        .unwrap();
        let script = doc.find("script").unwrap();
        assert_eq!(
            doc.text_content(script),
            "for (i=0;i<n;i++) { if (a<b && c>d) go(); }"
        );
        assert_eq!(doc.find_all("p").len(), 2);
        assert_eq!(doc.roots().len(), 3);
    }

    #[test]
    fn test_parse_style_with_child_combinator() {
        let doc = Document::parse("<STYLE>ul > li { color: red; }</STYLE><div></div>").unwrap();
        let style = doc.find("style").unwrap();
        assert_eq!(doc.text_content(style), "ul > li { color: red; }");
        assert!(doc.find("li").is_none());
        assert!(doc.find("div").is_some());
    }

    #[test]
    fn test_parse_raw_text_skips_comments() {
        let doc = Document::parse("<!-- <script> --><script>a<b</script><p>x</p>").unwrap();
        let scripts = doc.find_all("script");
        assert_eq!(scripts.len(), 1);
        assert_eq!(doc.text_content(scripts[0]), "a<b");
        assert!(doc.find("p").is_some());
    }

    #[test]
    fn test_split_raw_text() {
        let (stripped, bodies) =
            split_raw_text("<script type=\"a>b\">x<y</script><style>p>a{}</style>");
        assert_eq!(stripped, "<script type=\"a>b\"></script><style></style>");
        assert_eq!(bodies, ["x<y", "p>a{}"]);
    }

    #[test]
    fn test_parse_unclosed_script() {
        let doc = Document::parse("<p>x</p><script>if (a<b) go();").unwrap();
        let script = doc.find("script").unwrap();
        assert_eq!(doc.text_content(script), "if (a<b) go();");
    }

    #[test]
    fn test_parse_lowercases_attribute_names() {
        let doc = Document::parse("<A HREF=\"about.html\" Class=\"nav\">a</A>").unwrap();
        let a = doc.find("a").unwrap();
        let keys: Vec<_> = doc.attrs(a).unwrap().keys().collect();
        assert_eq!(keys, ["href", "class"]);
    }

    #[test]
    fn test_parse_svg_keeps_attribute_case() {
        let doc = Document::parse("<svg viewBox=\"0 0 1 1\"><path fillRule=\"x\"></path></svg>")
            .unwrap();
        let svg = doc.find("svg").unwrap();
        assert_eq!(doc.attrs(svg).unwrap().get("viewBox"), Some("0 0 1 1"));
        let path = doc.find("path").unwrap();
        assert_eq!(doc.attrs(path).unwrap().get("fillRule"), Some("x"));
    }

    #[test]
    fn test_parse_void_elements_have_no_children() {
        let doc = Document::parse("<LINK REL=\"stylesheet\" HREF=\"main.css\"><IMG SRC=\"a.png\">")
            .unwrap();
        let link = doc.find("link").unwrap();
        let img = doc.find("img").unwrap();
        assert!(doc.children(link).is_empty());
        assert!(doc.roots().contains(&img));
    }
}
