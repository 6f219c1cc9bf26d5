//! Step vocabulary of an install plan.

use std::fmt;

/// Release archives the installer fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Bootloader files placed in the browser install directory.
    Program,
    /// Bootloader files placed in the profile's `chrome` folder.
    Profile,
    /// The mod engine.
    Engine,
    /// Engine translations.
    Locales,
}

impl ArchiveKind {
    pub const ALL: [Self; 4] = [Self::Program, Self::Profile, Self::Engine, Self::Locales];

    pub const fn stem(self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Profile => "profile",
            Self::Engine => "engine",
            Self::Locales => "locales",
        }
    }

    /// Local file name, also the release asset name.
    pub fn file_name(self) -> String {
        format!("{}.zip", self.stem())
    }

    /// Whether the archive belongs to the bootloader release rather than
    /// the engine release.
    pub const fn is_bootloader(self) -> bool {
        matches!(self, Self::Program | Self::Profile)
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.zip", self.stem())
    }
}

/// One unit of work in an install plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    DownloadArchive(ArchiveKind),
    ConfigureBrowser,
    CleanBrowser,
    CleanProfile,
    ConfigureProfile,
    RemoveMods,
    ClearStartupCache,
    CleanupDownloads,
    /// Terminal no-op; reaching it marks the run complete.
    Finished,
}

impl StepKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DownloadArchive(ArchiveKind::Program) => "Downloading program.zip...",
            Self::DownloadArchive(ArchiveKind::Profile) => "Downloading profile.zip...",
            Self::DownloadArchive(ArchiveKind::Engine) => "Downloading engine.zip...",
            Self::DownloadArchive(ArchiveKind::Locales) => "Downloading locales.zip...",
            Self::ConfigureBrowser => "Configuring your browser...",
            Self::CleanBrowser => "Cleaning up your browser...",
            Self::CleanProfile => "Cleaning up your profile...",
            Self::ConfigureProfile => "Configuring your profile...",
            Self::RemoveMods => "Removing mods...",
            Self::ClearStartupCache => "Clearing startup cache...",
            Self::CleanupDownloads => "Cleaning up...",
            Self::Finished => "Finished.",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished)
    }

    pub const fn touches_network(self) -> bool {
        matches!(self, Self::DownloadArchive(_))
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
