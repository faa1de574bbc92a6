//! Markup and JSX text utilities.
//!
//! - `escape_jsx_text()` - text children that JSX would otherwise parse
//! - `quote_jsx_attr()` - attribute value literals
//! - `escape_template_literal()` - payloads embedded in backtick strings
//! - `is_void_element()` - Self-closing elements (br, img, etc.)
//! - `is_raw_text_element()` - Raw text elements (script, style)

use std::borrow::Cow;

// =============================================================================
// Escaping
// =============================================================================

/// Get the JSX-safe spelling of a character that is special in JSX text.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '{' => Some("{'{'}"),
        '}' => Some("{'}'}"),
        '>' => Some("&gt;"),
        _ => None,
    }
}

/// Escape text content so JSX reads it as literal text.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_jsx_text("a {b}"), "a {'{'}b{'}'}");
/// assert_eq!(escape_jsx_text("hello"), "hello"); // No allocation
/// ```
#[inline]
pub fn escape_jsx_text(s: &str) -> Cow<'_, str> {
    if !s.contains(['{', '}', '>']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Quote an attribute value as a JSX string literal.
///
/// Double quotes unless the value contains one; single quotes when only `"`
/// occurs; both present falls back to `&quot;`.
pub fn quote_jsx_attr(value: &str) -> String {
    match (value.contains('"'), value.contains('\'')) {
        (false, _) => format!("\"{value}\""),
        (true, false) => format!("'{value}'"),
        (true, true) => format!("\"{}\"", value.replace('"', "&quot;")),
    }
}

/// Escape a payload for embedding inside a JavaScript template literal.
pub fn escape_template_literal(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '`']) && !s.contains("${") {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace('\\', "\\\\")
            .replace('`', "\\`")
            .replace("${", "\\${"),
    )
}

// =============================================================================
// Element Classification
// =============================================================================

/// Check if an HTML tag is a void element (self-closing).
///
/// Void elements cannot have children and should be rendered as `<tag />`.
#[inline]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Check if tag is a raw text element (content is not markup).
///
/// Script and style content is "raw text".
#[inline]
pub fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}
