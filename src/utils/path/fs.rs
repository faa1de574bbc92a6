//! Filesystem path resolution.
//!
//! Config roots, watcher events and CLI arguments are all compared as
//! absolute, symlink-free paths.

use std::path::{Path, PathBuf};

/// Absolute, canonical form of `path`.
///
/// Paths that no longer exist (a file reported as removed by the watcher)
/// keep their name under the canonical form of the closest existing
/// ancestor, so they still compare equal to paths under a canonical root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    if let Ok(canonical) = absolute.canonicalize() {
        return canonical;
    }
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => normalize_path(parent).join(name),
        _ => absolute,
    }
}

/// Resolve a document argument: under `root` first, then against the cwd.
///
/// A page named on the command line belongs to the source tree, so a file
/// of the same name in the working directory never shadows it.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }

    let under_root = root.join(path);
    if under_root.exists() {
        normalize_path(&under_root)
    } else {
        normalize_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_relative_is_absolute() {
        assert!(normalize_path(Path::new("relative/file.txt")).is_absolute());
    }

    #[test]
    fn test_normalize_removed_file_under_canonical_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let gone = temp.path().join("docs/gone.html");
        assert_eq!(normalize_path(&gone), root.join("docs/gone.html"));
    }

    #[test]
    fn test_resolve_prefers_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("page.html"), "<p>x</p>").unwrap();
        let resolved = resolve_path(Path::new("page.html"), temp.path());
        assert_eq!(resolved, temp.path().canonicalize().unwrap().join("page.html"));
    }

    #[test]
    fn test_resolve_falls_back_to_cwd() {
        let temp = TempDir::new().unwrap();
        let resolved = resolve_path(Path::new("nowhere/page.html"), temp.path());
        assert_eq!(resolved, normalize_path(Path::new("nowhere/page.html")));
        assert!(!resolved.starts_with(temp.path().canonicalize().unwrap()));
    }

    #[test]
    fn test_resolve_absolute() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.html");
        fs::write(&file, "").unwrap();
        assert_eq!(
            resolve_path(&file, Path::new("/elsewhere")),
            file.canonicalize().unwrap()
        );
    }
}
