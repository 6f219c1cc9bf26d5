//! Static catalog of supported browsers, their channels and default locations.
//!
//! The catalog is compile-time data. Nothing here touches the filesystem;
//! existence checks live in [`crate::paths`].

mod browsers;

use std::fmt;
use std::path::{Path, PathBuf};

pub use browsers::BROWSERS;

/// Operating system family the installer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsKind {
    Windows,
    MacOs,
    Linux,
}

impl OsKind {
    /// The OS this binary was compiled for. Unknown unix flavours are
    /// treated as Linux.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Catalog key used by release tooling (`win32`, `darwin`, `linux`).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Windows => "win32",
            Self::MacOs => "darwin",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One value per supported OS.
#[derive(Debug, Clone, Copy)]
pub struct PerOs<T> {
    pub windows: T,
    pub macos: T,
    pub linux: T,
}

impl<T: Copy> PerOs<T> {
    pub const fn get(&self, os: OsKind) -> T {
        match os {
            OsKind::Windows => self.windows,
            OsKind::MacOs => self.macos,
            OsKind::Linux => self.linux,
        }
    }
}

/// A release channel and its candidate install directories, in preference order.
///
/// Entries starting with `~` are relative to the user's home directory.
#[derive(Debug)]
pub struct Channel {
    pub name: &'static str,
    pub install_paths: PerOs<&'static [&'static str]>,
}

/// A supported browser.
#[derive(Debug)]
pub struct BrowserDefinition {
    pub name: &'static str,
    /// Profile-root location relative to the OS base directory
    /// (`%APPDATA%` on Windows, `~/Library/Application Support` on macOS,
    /// `$HOME` on Linux).
    pub profile: PerOs<&'static str>,
    pub channels: &'static [Channel],
}

/// Catalog entries are identified by name.
impl PartialEq for BrowserDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for BrowserDefinition {}

impl BrowserDefinition {
    pub fn channel(&self, name: &str) -> Option<&'static Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name).collect()
    }

    /// Expanded install candidates for a channel on `os`.
    ///
    /// Home-relative entries are dropped when `home` is unknown.
    pub fn install_candidates(
        &self,
        channel: &str,
        os: OsKind,
        home: Option<&Path>,
    ) -> Vec<PathBuf> {
        self.channel(channel)
            .map(|c| {
                c.install_paths
                    .get(os)
                    .iter()
                    .filter_map(|raw| expand_home(raw, home))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every install candidate across all channels for `os`.
    fn all_candidates(&self, os: OsKind, home: Option<&Path>) -> Vec<PathBuf> {
        self.channels
            .iter()
            .flat_map(|c| self.install_candidates(c.name, os, home))
            .collect()
    }
}

fn expand_home(raw: &str, home: Option<&Path>) -> Option<PathBuf> {
    match raw.strip_prefix('~') {
        Some(rest) => home.map(|h| {
            rest.split(['/', '\\'])
                .filter(|part| !part.is_empty())
                .fold(h.to_path_buf(), |path, part| path.join(part))
        }),
        None => Some(PathBuf::from(raw)),
    }
}

/// Names of every supported browser, in display order.
pub fn list_browsers() -> Vec<&'static str> {
    BROWSERS.iter().map(|b| b.name).collect()
}

pub fn find_browser(name: &str) -> Option<&'static BrowserDefinition> {
    BROWSERS.iter().find(|b| b.name == name)
}

/// Channel names for a browser. Unknown browsers yield an empty list.
pub fn list_channels(browser: &str) -> Vec<&'static str> {
    find_browser(browser)
        .map(BrowserDefinition::channel_names)
        .unwrap_or_default()
}

/// Process name used for liveness checks: lowercase browser name, plus
/// `.exe` on Windows.
pub fn process_name(browser: &str, os: OsKind) -> String {
    let base = browser.to_lowercase();
    match os {
        OsKind::Windows => format!("{base}.exe"),
        OsKind::MacOs | OsKind::Linux => base,
    }
}

/// Match an arbitrary install directory back to a catalog browser.
///
/// Used when paths are supplied on the command line. Matching compares
/// normalised paths so trailing separators and letter case on Windows do
/// not matter. When no candidate matches, the first browser whose name
/// appears anywhere in the path (ignoring case) wins.
pub fn identify_browser(
    install_path: &Path,
    os: OsKind,
    home: Option<&Path>,
) -> Option<&'static BrowserDefinition> {
    let wanted = normalise(install_path, os);
    BROWSERS
        .iter()
        .find(|browser| {
            browser
                .all_candidates(os, home)
                .iter()
                .any(|candidate| normalise(candidate, os) == wanted)
        })
        .or_else(|| {
            let lowered = install_path.to_string_lossy().to_lowercase();
            BROWSERS
                .iter()
                .find(|browser| lowered.contains(&browser.name.to_lowercase()))
        })
}

fn normalise(path: &Path, os: OsKind) -> String {
    let text = path.to_string_lossy();
    let trimmed = text.trim_end_matches(['/', '\\']);
    match os {
        OsKind::Windows | OsKind::MacOs => trimmed.to_lowercase(),
        OsKind::Linux => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_browsers_in_display_order() {
        assert_eq!(
            list_browsers(),
            vec!["Firefox", "Floorp", "Mullvad", "Waterfox", "Zen"]
        );
    }

    #[test]
    fn channels_for_known_and_unknown_browsers() {
        assert_eq!(
            list_channels("Firefox"),
            vec!["Stable", "Developer Edition", "Nightly"]
        );
        assert_eq!(list_channels("Zen"), vec!["Beta", "Twilight"]);
        assert!(list_channels("Netscape").is_empty());
    }

    #[test]
    fn every_channel_has_candidates_on_every_os() {
        for browser in BROWSERS {
            for channel in browser.channels {
                for os in [OsKind::Windows, OsKind::MacOs, OsKind::Linux] {
                    assert!(
                        !channel.install_paths.get(os).is_empty(),
                        "{} {} has no candidates on {os}",
                        browser.name,
                        channel.name
                    );
                }
            }
        }
    }

    #[test]
    fn home_relative_candidates_expand_or_drop() {
        let mullvad = find_browser("Mullvad").unwrap();
        let home = Path::new("/home/tester");

        let expanded = mullvad.install_candidates("Stable", OsKind::Windows, Some(home));
        assert_eq!(expanded.len(), 1);
        assert!(expanded[0].starts_with(home));
        assert!(expanded[0].ends_with("Release"));

        assert!(
            mullvad
                .install_candidates("Stable", OsKind::Windows, None)
                .is_empty()
        );
    }

    #[test]
    fn process_names_follow_os_convention() {
        assert_eq!(process_name("Firefox", OsKind::Windows), "firefox.exe");
        assert_eq!(process_name("Zen", OsKind::Linux), "zen");
        assert_eq!(process_name("Waterfox", OsKind::MacOs), "waterfox");
    }

    #[test]
    fn identifies_browser_from_install_dir() {
        let found = identify_browser(Path::new("/opt/floorp"), OsKind::Linux, None).unwrap();
        assert_eq!(found.name, "Floorp");

        let found = identify_browser(
            Path::new(r"c:\program files\zen twilight\"),
            OsKind::Windows,
            None,
        )
        .unwrap();
        assert_eq!(found.name, "Zen");

        assert!(identify_browser(Path::new("/srv/custom"), OsKind::Linux, None).is_none());
    }

    #[test]
    fn falls_back_to_name_in_path() {
        let found =
            identify_browser(Path::new("/home/me/apps/Waterfox-G"), OsKind::Linux, None).unwrap();
        assert_eq!(found.name, "Waterfox");
    }

    #[test]
    fn os_keys() {
        assert_eq!(OsKind::Windows.key(), "win32");
        assert_eq!(OsKind::MacOs.to_string(), "darwin");
        assert_eq!(OsKind::Linux.key(), "linux");
    }
}
