//! File category definitions.

use std::path::Path;

use crate::transpile::is_document;

/// How a file under the source root is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// Markup document (.html/.htm): converted to a component module
    Document,
    /// Anything else: copied verbatim next to the generated modules
    Asset,
}

impl FileCategory {
    pub fn from_path(path: &Path) -> Self {
        if is_document(path) {
            Self::Document
        } else {
            Self::Asset
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Asset => "asset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(FileCategory::from_path(Path::new("a/index.html")), FileCategory::Document);
        assert_eq!(FileCategory::from_path(Path::new("old.HTM")), FileCategory::Document);
        assert_eq!(FileCategory::from_path(Path::new("logo.png")), FileCategory::Asset);
        assert_eq!(FileCategory::from_path(Path::new("Makefile")), FileCategory::Asset);
    }
}
