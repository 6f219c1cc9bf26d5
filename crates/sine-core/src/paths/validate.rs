//! Checks applied to user-entered install and profile locations.

use std::path::Path;

use super::PathError;
use crate::catalog::OsKind;

/// A browser install directory must exist, be a folder, and (outside macOS,
/// where the bundle layout differs) contain a `browser` subdirectory.
pub fn validate_browser_dir(path: &Path, os: OsKind) -> Result<(), PathError> {
    check_existing_dir(path)?;
    if os != OsKind::MacOs && !path.join("browser").is_dir() {
        return Err(PathError::NotABrowserDir(path.to_path_buf()));
    }
    Ok(())
}

/// A profile root must exist, be a folder, and must not be the parent of a
/// `Profiles` folder.
pub fn validate_profile_root(path: &Path) -> Result<(), PathError> {
    check_existing_dir(path)?;
    if path.join("Profiles").exists() {
        return Err(PathError::ProfilesParent(path.to_path_buf()));
    }
    Ok(())
}

fn check_existing_dir(path: &Path) -> Result<(), PathError> {
    if path.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }
    if !path.exists() {
        return Err(PathError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
