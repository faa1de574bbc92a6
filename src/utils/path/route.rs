//! Link and route string utilities.
//!
//! Pure functions, no filesystem access:
//! - Link type detection (external vs document-relative)
//! - Splitting `?query` / `#fragment` suffixes
//! - Lexical joining of relative paths into `/`-separated form

use std::path::{Component, Path};

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// Protocol-relative links (`//cdn.example.com/x.js`) also count as external.
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.starts_with("//")
        || link.find(':').is_some_and(|pos| {
            pos > 0
                && link[..pos]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
}

/// Split a link into its path and the `?query` / `#fragment` suffix.
///
/// The suffix keeps its leading `?` or `#`.
#[inline]
pub fn split_path_suffix(link: &str) -> (&str, &str) {
    match link.find(['?', '#']) {
        Some(pos) => link.split_at(pos),
        None => (link, ""),
    }
}

/// Join `rel` onto `base` lexically and return `/`-separated components.
///
/// `.` segments are dropped and `..` pops a segment (never above the root).
/// A leading `/` in `rel` discards `base`.
pub fn join_normalized(base: &Path, rel: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !rel.starts_with('/') {
        for component in base.components() {
            push_segment(&mut parts, component);
        }
    }
    for segment in rel.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other.to_string()),
        }
    }

    parts.join("/")
}

fn push_segment(parts: &mut Vec<String>, component: Component<'_>) {
    match component {
        Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
        Component::ParentDir => {
            parts.pop();
        }
        Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    join_normalized(path, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("http://example.com"));
        assert!(is_external_link("mailto:user@example.com"));
        assert!(is_external_link("tel:+1234567890"));
        assert!(is_external_link("//cdn.example.com/lib.js"));
        assert!(!is_external_link("/about"));
        assert!(!is_external_link("./file.txt"));
        assert!(!is_external_link("#section"));
    }

    #[test]
    fn test_split_path_suffix() {
        assert_eq!(split_path_suffix("about.html#team"), ("about.html", "#team"));
        assert_eq!(split_path_suffix("a.html?x=1#y"), ("a.html", "?x=1#y"));
        assert_eq!(split_path_suffix("a.html"), ("a.html", ""));
    }

    #[test]
    fn test_join_normalized() {
        assert_eq!(join_normalized(Path::new(""), "about.html"), "about.html");
        assert_eq!(join_normalized(Path::new("docs"), "a/b.html"), "docs/a/b.html");
        assert_eq!(join_normalized(Path::new("docs/x"), "../b.html"), "docs/b.html");
        assert_eq!(join_normalized(Path::new("docs"), "./b.html"), "docs/b.html");
        assert_eq!(join_normalized(Path::new("docs"), "/b.html"), "b.html");
        assert_eq!(join_normalized(Path::new(""), "../../b.html"), "b.html");
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("a/b")), "a/b");
        assert_eq!(to_slash(Path::new("")), "");
        assert_eq!(to_slash(Path::new("./a")), "a");
    }
}
