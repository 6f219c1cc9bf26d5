//! Profile discovery, previous-install detection and preference files.

mod legacy;
mod prefs;

use std::fs;
use std::path::Path;

pub use legacy::{LegacyInstall, detect_legacy_install};
pub use prefs::{
    PREF_IS_COSINE, PREF_LATEST_VERSION, PREF_VERSION, PREFS_FILE, PrefValue,
    append_install_prefs, format_pref, install_prefs, read_pref,
};

/// Profile folder names under `root`, sorted.
///
/// Unless `show_unused` is set, only folders with a `prefs.js` (profiles
/// the browser has actually opened) are listed. A missing root lists nothing.
pub fn list_profiles(root: &Path, show_unused: bool) -> Vec<String> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter(|entry| show_unused || entry.path().join(PREFS_FILE).is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_used_profiles_unless_asked() {
        let dir = TempDir::new().unwrap();
        for name in ["b.default-release", "a.dev", "c.unused"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("b.default-release").join(PREFS_FILE), "").unwrap();
        fs::write(dir.path().join("a.dev").join(PREFS_FILE), "").unwrap();
        fs::write(dir.path().join("installs.ini"), "").unwrap();

        assert_eq!(
            list_profiles(dir.path(), false),
            vec!["a.dev", "b.default-release"]
        );
        assert_eq!(
            list_profiles(dir.path(), true),
            vec!["a.dev", "b.default-release", "c.unused"]
        );
    }

    #[test]
    fn missing_root_lists_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(list_profiles(&dir.path().join("missing"), true).is_empty());
    }
}
