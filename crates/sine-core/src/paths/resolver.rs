//! Resolution of install and profile locations from the catalog.

use std::fmt;
use std::path::{Path, PathBuf};

use super::PathError;
use crate::catalog::{BrowserDefinition, OsKind, process_name};

/// Per-user base directories the resolver works from.
///
/// Injected rather than read from the environment so resolution is a pure
/// function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialDirs {
    pub home: Option<PathBuf>,
    /// Roaming `AppData` on Windows, `Library/Application Support` on macOS.
    pub app_data: Option<PathBuf>,
    /// Per-user cache root (`AppData\Local`, `Library/Caches`, `~/.cache`).
    pub cache: Option<PathBuf>,
}

impl SpecialDirs {
    /// Query the running user's directories.
    pub fn detect() -> Self {
        Self {
            home: dirs::home_dir(),
            app_data: dirs::config_dir(),
            cache: dirs::cache_dir(),
        }
    }

    /// The standard layout for `os` underneath an arbitrary home directory.
    pub fn rooted_at(home: &Path, os: OsKind) -> Self {
        let (app_data, cache) = match os {
            OsKind::Windows => (
                home.join("AppData").join("Roaming"),
                home.join("AppData").join("Local"),
            ),
            OsKind::MacOs => (
                home.join("Library").join("Application Support"),
                home.join("Library").join("Caches"),
            ),
            OsKind::Linux => (home.join(".config"), home.join(".cache")),
        };
        Self {
            home: Some(home.to_path_buf()),
            app_data: Some(app_data),
            cache: Some(cache),
        }
    }
}

/// First existing install candidate for `browser`/`channel`, if any.
///
/// `None` means the user has to enter the path by hand.
pub fn resolve_install_path(
    browser: &BrowserDefinition,
    channel: &str,
    os: OsKind,
    dirs: &SpecialDirs,
) -> Option<PathBuf> {
    let found = browser
        .install_candidates(channel, os, dirs.home.as_deref())
        .into_iter()
        .find(|candidate| candidate.exists());
    tracing::debug!(
        browser = browser.name,
        channel,
        found = ?found,
        "Resolved install path"
    );
    found
}

/// Location of the browser's profile root, the folder holding individual
/// profiles. The directory may not exist.
pub fn resolve_profile_root(
    browser: &BrowserDefinition,
    os: OsKind,
    dirs: &SpecialDirs,
) -> Result<PathBuf, PathError> {
    let base = match os {
        OsKind::Windows | OsKind::MacOs => {
            dirs.app_data.as_ref().ok_or(PathError::NoAppDataDir)?
        }
        OsKind::Linux => dirs.home.as_ref().ok_or(PathError::NoHomeDir)?,
    };
    let root = browser
        .profile
        .get(os)
        .split(['/', '\\'])
        .fold(base.clone(), |path, part| path.join(part));
    Ok(match os {
        OsKind::Windows | OsKind::MacOs => root.join("Profiles"),
        OsKind::Linux => root,
    })
}

/// The browser and profile an install run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstallContext {
    /// Catalog entry, when known. Headless runs with custom paths may not
    /// match any.
    pub browser: Option<&'static BrowserDefinition>,
    pub channel: Option<String>,
    pub browser_path: PathBuf,
    pub profile_path: PathBuf,
}

impl ResolvedInstallContext {
    pub fn new(browser_path: impl Into<PathBuf>, profile_path: impl Into<PathBuf>) -> Self {
        Self {
            browser: None,
            channel: None,
            browser_path: browser_path.into(),
            profile_path: profile_path.into(),
        }
    }

    #[must_use]
    pub fn with_browser(
        mut self,
        browser: &'static BrowserDefinition,
        channel: Option<String>,
    ) -> Self {
        self.browser = Some(browser);
        self.channel = channel;
        self
    }

    /// Process to guard against, if the browser is known.
    pub fn process_name(&self, os: OsKind) -> Option<String> {
        self.browser.map(|b| process_name(b.name, os))
    }

    /// `<profile>/chrome`, where the loader lives.
    pub fn chrome_dir(&self) -> PathBuf {
        self.profile_path.join("chrome")
    }
}

impl fmt::Display for ResolvedInstallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "browser = {}",
            self.browser.map_or("unknown", |b| b.name)
        )?;
        writeln!(f, "channel = {}", self.channel.as_deref().unwrap_or("-"))?;
        writeln!(f, "browser_path = {}", self.browser_path.display())?;
        write!(f, "profile_path = {}", self.profile_path.display())
    }
}
