use std::path::Path;

use super::prefs::{PREF_VERSION, read_pref};

/// What a profile already carries from a previous install.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LegacyInstall {
    #[default]
    Absent,
    Present {
        /// Engine version recorded in `prefs.js`, if any.
        version: Option<String>,
        /// Whether `chrome/sine-mods` holds user mods.
        has_mods: bool,
    },
}

impl LegacyInstall {
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }

    pub const fn has_mods(&self) -> bool {
        matches!(self, Self::Present { has_mods: true, .. })
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Present { version, .. } => version.as_deref(),
            Self::Absent => None,
        }
    }
}

/// Inspect a profile for an earlier install.
///
/// Only loader files on disk (`chrome/JS` or `chrome/utils`) count as an
/// install. The `sine.version` preference outlives an uninstall, so it only
/// supplies the version of a present install.
pub fn detect_legacy_install(profile: &Path) -> LegacyInstall {
    let chrome = profile.join("chrome");
    if !LOADER_DIRS.iter().any(|dir| chrome.join(dir).is_dir()) {
        return LegacyInstall::Absent;
    }

    let version = read_pref(profile, PREF_VERSION).unwrap_or_else(|e| {
        tracing::warn!(profile = %profile.display(), error = %e, "Could not read prefs.js");
        None
    });
    LegacyInstall::Present {
        version,
        has_mods: chrome.join("sine-mods").is_dir(),
    }
}

const LOADER_DIRS: [&str; 2] = ["JS", "utils"];
