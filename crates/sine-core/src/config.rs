//! Release coordinates and environment overrides.
//!
//! This module contains the installer's configuration type. It is a plain
//! value with no infrastructure dependencies; the binary decides where the
//! overrides come from.

use std::path::PathBuf;

use thiserror::Error;

use crate::plan::ArchiveKind;

/// Default release root for the bootloader archives.
pub const DEFAULT_BOOTLOADER_URL: &str = "https://github.com/sineorg/bootloader/releases/download";

/// Default release root for the engine archives.
pub const DEFAULT_ENGINE_URL: &str = "https://github.com/CosmoCreeper/Sine/releases/download";

pub const DEFAULT_BOOT_VERSION: &str = "0.1.1";
pub const DEFAULT_ENGINE_VERSION: &str = "2.3c";

pub const ENV_BOOTLOADER_URL: &str = "SINE_BOOTLOADER_URL";
pub const ENV_ENGINE_URL: &str = "SINE_ENGINE_URL";
pub const ENV_BOOT_VERSION: &str = "SINE_BOOT_VERSION";
pub const ENV_ENGINE_VERSION: &str = "SINE_VERSION";
pub const ENV_IS_COSINE: &str = "SINE_IS_COSINE";
pub const ENV_DOWNLOADS_DIR: &str = "SINE_DOWNLOADS_DIR";

/// Every override [`InstallerConfig::from_env`] reads. A privileged
/// relaunch passes these on so the child resolves the same release.
pub const ENV_KEYS: &[&str] = &[
    ENV_BOOTLOADER_URL,
    ENV_ENGINE_URL,
    ENV_BOOT_VERSION,
    ENV_ENGINE_VERSION,
    ENV_IS_COSINE,
    ENV_DOWNLOADS_DIR,
];

/// Errors raised while reading configuration overrides.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean override was not one of the accepted spellings.
    #[error("{key} must be a boolean (true/false/1/0), got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    /// An override was set but empty.
    #[error("{0} is set but empty")]
    Empty(&'static str),
}

/// Where to fetch releases from and which versions to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    pub bootloader_base_url: String,
    pub engine_base_url: String,
    pub boot_version: String,
    pub engine_version: String,
    /// Whether the engine build is the cosine flavour; persisted as a pref.
    pub is_cosine: bool,
    /// Overrides the platform downloads folder for archive staging.
    pub downloads_dir: Option<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            bootloader_base_url: DEFAULT_BOOTLOADER_URL.to_string(),
            engine_base_url: DEFAULT_ENGINE_URL.to_string(),
            boot_version: DEFAULT_BOOT_VERSION.to_string(),
            engine_version: DEFAULT_ENGINE_VERSION.to_string(),
            is_cosine: true,
            downloads_dir: None,
        }
    }
}

impl InstallerConfig {
    /// Defaults overlaid with `SINE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(key)),
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        let mut config = Self::default();
        if let Some(url) = text(ENV_BOOTLOADER_URL)? {
            config.bootloader_base_url = url;
        }
        if let Some(url) = text(ENV_ENGINE_URL)? {
            config.engine_base_url = url;
        }
        if let Some(version) = text(ENV_BOOT_VERSION)? {
            config.boot_version = version;
        }
        if let Some(version) = text(ENV_ENGINE_VERSION)? {
            config.engine_version = version;
        }
        if let Some(raw) = text(ENV_IS_COSINE)? {
            config.is_cosine = parse_bool(ENV_IS_COSINE, &raw)?;
        }
        config.downloads_dir = text(ENV_DOWNLOADS_DIR)?.map(PathBuf::from);
        Ok(config)
    }

    /// `<base>/v<version>/<name>.zip` for the release the archive belongs to.
    pub fn archive_url(&self, kind: ArchiveKind) -> String {
        let (base, version) = if kind.is_bootloader() {
            (&self.bootloader_base_url, &self.boot_version)
        } else {
            (&self.engine_base_url, &self.engine_version)
        };
        format!(
            "{}/v{}/{}",
            base.trim_end_matches('/'),
            version,
            kind.file_name()
        )
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}
