//! Pure construction of install plans.

use super::{ArchiveKind, InstallFlags, InstallPlan, StepKind};
use crate::profile::LegacyInstall;

const UNINSTALL: &[StepKind] = &[
    StepKind::CleanBrowser,
    StepKind::CleanProfile,
    StepKind::RemoveMods,
    StepKind::ClearStartupCache,
];

const BOOTLOADER: &[StepKind] = &[
    StepKind::DownloadArchive(ArchiveKind::Program),
    StepKind::ConfigureBrowser,
];

const INSTALL: &[StepKind] = &[
    StepKind::DownloadArchive(ArchiveKind::Profile),
    StepKind::DownloadArchive(ArchiveKind::Engine),
    StepKind::DownloadArchive(ArchiveKind::Locales),
    StepKind::CleanProfile,
    StepKind::ConfigureProfile,
    StepKind::RemoveMods,
    StepKind::ClearStartupCache,
    StepKind::CleanupDownloads,
];

/// Flags after accounting for what is already installed.
///
/// Without a previous install there is no bootloader to keep and no mod
/// data to save, so the bootloader is always installed and saving is off.
pub fn effective_flags(flags: &InstallFlags, legacy: &LegacyInstall) -> InstallFlags {
    if legacy.is_present() {
        *flags
    } else {
        InstallFlags {
            save_data: false,
            reinstall_boot: true,
            ..*flags
        }
    }
}

/// Build the ordered step list for a run.
pub fn build_plan(flags: &InstallFlags, legacy: &LegacyInstall) -> InstallPlan {
    let flags = effective_flags(flags, legacy);
    let mut steps = Vec::with_capacity(BOOTLOADER.len() + INSTALL.len() + 1);
    if flags.uninstall {
        steps.extend_from_slice(UNINSTALL);
    } else {
        if flags.reinstall_boot {
            steps.extend_from_slice(BOOTLOADER);
        }
        steps.extend_from_slice(INSTALL);
    }
    steps.push(StepKind::Finished);
    InstallPlan::new(steps)
}
