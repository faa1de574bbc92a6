//! JSX serialization.

use super::{Document, NodeId, NodeKind};
use crate::utils::html::{escape_jsx_text, is_void_element, quote_jsx_attr};

pub(super) fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Text(text) => out.push_str(&escape_jsx_text(text)),
        NodeKind::Verbatim(text) => out.push_str(text),
        NodeKind::Comment(text) => {
            // A comment containing the terminator cannot be expressed
            if !text.contains("*/") {
                out.push_str("{/* ");
                out.push_str(text);
                out.push_str(" */}");
            }
        }
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (key, value) in element.attrs.iter() {
                out.push(' ');
                out.push_str(key);
                if let Some(value) = value {
                    out.push('=');
                    out.push_str(&quote_jsx_attr(value));
                }
            }

            let children = doc.children(id);
            if children.is_empty() && is_void_element(&element.name) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for &child in children {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::Document;

    fn roundtrip(html: &str) -> String {
        let doc = Document::parse(html).unwrap();
        doc.roots().iter().map(|&id| doc.outer_jsx(id)).collect()
    }

    #[test]
    fn test_void_elements_self_close() {
        assert_eq!(
            roundtrip("<p>a<br>b</p><img src=\"x.png\">"),
            "<p>a<br />b</p><img src=\"x.png\" />"
        );
    }

    #[test]
    fn test_braces_in_text_escaped() {
        assert_eq!(roundtrip("<p>{x}</p>"), "<p>{'{'}x{'}'}</p>");
    }

    #[test]
    fn test_comment_becomes_jsx_comment() {
        assert_eq!(roundtrip("<div><!-- note --></div>"), "<div>{/* note */}</div>");
    }

    #[test]
    fn test_bare_attribute() {
        assert_eq!(roundtrip("<input disabled>"), "<input disabled />");
    }
}
