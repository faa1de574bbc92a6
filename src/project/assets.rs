//! Source tree walking and verbatim asset copies.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use jwalk::WalkDir;

use crate::transpile::TranspileError;

/// OS-generated files that never belong in the output.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

pub fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| IGNORED_FILES.contains(&name))
}

/// Collect all files under `dir` recursively, in sorted order.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| !is_ignored(p))
        .collect()
}

/// Modification time, if the file exists.
fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Returns `true` if `a` exists and is newer than `b`.
pub fn is_newer_than(a: &Path, b: &Path) -> bool {
    let (Some(a_time), Some(b_time)) = (get_mtime(a), get_mtime(b)) else {
        return false;
    };
    a_time > b_time
}

/// Copy one asset. Returns `false` when the existing copy is up to date.
pub fn copy_asset(source: &Path, output: &Path) -> Result<bool, TranspileError> {
    if output.exists() && !is_newer_than(source, output) {
        return Ok(false);
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| TranspileError::io(parent, e))?;
    }
    fs::copy(source, output).map_err(|e| TranspileError::io(source, e))?;
    Ok(true)
}

/// Remove a copied asset; a copy that is already gone is fine.
pub fn remove_asset(output: &Path) -> Result<(), TranspileError> {
    match fs::remove_file(output) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(TranspileError::io(output, e)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_collect_all_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/z.png"), "").unwrap();
        fs::write(dir.path().join("a.html"), "").unwrap();
        fs::write(dir.path().join("Thumbs.db"), "").unwrap();

        let files: Vec<_> = collect_all_files(dir.path())
            .into_iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(files, [PathBuf::from("a.html"), PathBuf::from("b/z.png")]);
    }

    #[test]
    fn test_copy_asset_skips_fresh_copy() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("logo.png");
        let output = dir.path().join("out/img/logo.png");
        fs::write(&source, b"v1").unwrap();

        assert!(copy_asset(&source, &output).unwrap());
        assert_eq!(fs::read(&output).unwrap(), b"v1");
        assert!(!copy_asset(&source, &output).unwrap());

        std::thread::sleep(Duration::from_millis(20));
        fs::write(&source, b"v2").unwrap();
        let later = SystemTime::now() + Duration::from_secs(5);
        fs::File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(later)
            .unwrap();
        assert!(copy_asset(&source, &output).unwrap());
        assert_eq!(fs::read(&output).unwrap(), b"v2");
    }

    #[test]
    fn test_remove_asset() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("gone.css");
        assert!(remove_asset(&output).is_ok());

        fs::write(&output, "a{}").unwrap();
        remove_asset(&output).unwrap();
        assert!(!output.exists());
    }
}
