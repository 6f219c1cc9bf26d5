//! Per-step work.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::PlanExecutor;
use crate::error::{InstallError, InstallResult};
use crate::paths::startup_cache_dir;
use crate::plan::{ArchiveKind, StepKind};
use crate::profile::{PREFS_FILE, append_install_prefs};

/// Loader files the bootloader drops into the browser directory.
const BROWSER_LOADER_FILES: &[&str] = &["defaults/pref/config-prefs.js", "config.js"];

/// Folders under `chrome/` owned by the loader and engine.
const PROFILE_LOADER_DIRS: &[&str] = &["JS", "utils", "locales"];

const MODS_DIR: &str = "sine-mods";

impl PlanExecutor {
    pub(super) async fn run_step(&self, step: StepKind) -> InstallResult<()> {
        match step {
            StepKind::DownloadArchive(kind) => {
                let url = self.config.archive_url(kind);
                self.archives.fetch(&url, &self.archive_path(kind)).await
            }
            StepKind::ConfigureBrowser => self
                .archives
                .extract(&self.archive_path(ArchiveKind::Program), &self.context.browser_path),
            StepKind::CleanBrowser => {
                for relative in BROWSER_LOADER_FILES {
                    remove_file_if_exists(&join_relative(&self.context.browser_path, relative))?;
                }
                Ok(())
            }
            StepKind::CleanProfile => {
                let chrome = self.context.chrome_dir();
                for dir in PROFILE_LOADER_DIRS {
                    remove_dir_if_exists(&chrome.join(dir))?;
                }
                Ok(())
            }
            StepKind::ConfigureProfile => self.configure_profile(),
            StepKind::RemoveMods => {
                if self.flags.save_data {
                    tracing::debug!("Keeping sine-mods");
                    return Ok(());
                }
                remove_dir_if_exists(&self.context.chrome_dir().join(MODS_DIR))
            }
            StepKind::ClearStartupCache => {
                let dirs = self.platform.special_dirs();
                match startup_cache_dir(&self.context.profile_path, self.platform.os(), &dirs) {
                    Some(cache) => remove_dir_if_exists(&cache),
                    None => {
                        tracing::debug!(
                            profile = %self.context.profile_path.display(),
                            "No startup cache location for profile"
                        );
                        Ok(())
                    }
                }
            }
            StepKind::CleanupDownloads => {
                for kind in ArchiveKind::ALL {
                    remove_file_if_exists(&self.archive_path(kind))?;
                }
                Ok(())
            }
            StepKind::Finished => Ok(()),
        }
    }

    fn configure_profile(&self) -> InstallResult<()> {
        let chrome = self.context.chrome_dir();
        for kind in [ArchiveKind::Profile, ArchiveKind::Engine, ArchiveKind::Locales] {
            self.archives.extract(&self.archive_path(kind), &chrome)?;
        }

        let profile = &self.context.profile_path;
        append_install_prefs(profile, &self.config).map_err(|e| InstallError::io(profile, e))?;
        self.repair(&profile.join(PREFS_FILE));
        Ok(())
    }

    fn archive_path(&self, kind: ArchiveKind) -> PathBuf {
        self.downloads_dir.join(kind.file_name())
    }

    /// Best-effort permission repair; failures are logged only.
    pub(super) fn repair(&self, path: &Path) {
        if let Err(e) = self.platform.repair_permissions(path) {
            tracing::warn!(path = %path.display(), error = %e, "Could not repair permissions");
        }
    }
}

fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

fn remove_file_if_exists(path: &Path) -> InstallResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(InstallError::io(path, e)),
    }
}

fn remove_dir_if_exists(path: &Path) -> InstallResult<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(InstallError::io(path, e)),
    }
}
