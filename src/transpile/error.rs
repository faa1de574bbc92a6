//! Transpilation error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converting a project or a single document.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// Source or destination root is missing or unusable.
    #[error("configured {role} directory `{}` does not exist", path.display())]
    Configuration { role: &'static str, path: PathBuf },

    #[error("entry document `{}` not found", path.display())]
    MissingEntryPoint { path: PathBuf },

    /// Extraction and mapping sequences disagree; the file is skipped.
    #[error(
        "tag sequence mismatch in `{}` at index {index}: expected <{expected}>, found <{found}>",
        file.display()
    )]
    Consistency {
        file: PathBuf,
        index: usize,
        expected: String,
        found: String,
    },

    #[error("destination `{}` is not a generated project: {reason}", path.display())]
    Scaffold { path: PathBuf, reason: String },

    #[error("failed to parse `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("IO error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranspileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error only concerns one file of a batch.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::Consistency { .. } | Self::Parse { .. } | Self::Io { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_display() {
        let err = TranspileError::Consistency {
            file: PathBuf::from("about.html"),
            index: 3,
            expected: "a".into(),
            found: "img".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("about.html"));
        assert!(display.contains("index 3"));

        let err = TranspileError::io("x.html", Error::new(ErrorKind::NotFound, "gone"));
        assert!(format!("{err}").contains("x.html"));
    }

    #[test]
    fn test_per_file_classification() {
        let err = TranspileError::MissingEntryPoint {
            path: PathBuf::from("index.html"),
        };
        assert!(!err.is_per_file());

        let err = TranspileError::Parse {
            path: PathBuf::from("a.html"),
            message: "bad".into(),
        };
        assert!(err.is_per_file());
    }
}
