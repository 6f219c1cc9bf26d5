//! Write-access checks on existing folders.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

const SCRATCH_NAME: &str = ".sine-installer-access";

/// Whether files can be created in `dir`.
///
/// Creates and removes an empty scratch file. A missing folder is never
/// writable. Nothing is created on its behalf.
pub fn is_writable(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    let scratch = dir.join(SCRATCH_NAME);
    match OpenOptions::new().write(true).create_new(true).open(&scratch) {
        Ok(_) => {
            if let Err(e) = fs::remove_file(&scratch) {
                tracing::debug!(path = %scratch.display(), error = %e, "Scratch file left behind");
            }
            true
        }
        // Left over from an interrupted check; creating it proved access once.
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            fs::remove_file(&scratch).is_ok()
        }
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Folder is not writable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn temp_dir_is_writable_and_left_clean() {
        let dir = TempDir::new().unwrap();
        assert!(is_writable(dir.path()));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn stale_scratch_file_is_cleared() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SCRATCH_NAME), "").unwrap();
        assert!(is_writable(dir.path()));
        assert!(!dir.path().join(SCRATCH_NAME).exists());
    }

    #[test]
    fn missing_dir_is_not_writable_and_not_created() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(!is_writable(&missing));
        assert!(!missing.exists());
    }

    #[test]
    fn file_is_not_writable_as_folder() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("prefs.js");
        fs::write(&file, "").unwrap();
        assert!(!is_writable(&file));
    }
}
