use std::ffi::OsString;
use std::path::PathBuf;

use crate::plan::InstallFlags;

/// Everything a privileged instance needs to resume a run.
///
/// Sent as command-line arguments only; nothing is written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationRequest {
    pub browser_path: PathBuf,
    pub profile_path: PathBuf,
    pub flags: InstallFlags,
}

impl ElevationRequest {
    pub fn new(
        browser_path: impl Into<PathBuf>,
        profile_path: impl Into<PathBuf>,
        flags: InstallFlags,
    ) -> Self {
        Self {
            browser_path: browser_path.into(),
            profile_path: profile_path.into(),
            flags,
        }
    }

    /// `--browser <path> --profile <path> [-s] [-u] [--no-boot] [--update]`
    ///
    /// Flags at their default value are omitted.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--browser".into(),
            self.browser_path.clone().into_os_string(),
            "--profile".into(),
            self.profile_path.clone().into_os_string(),
        ];
        if self.flags.save_data {
            args.push("-s".into());
        }
        if self.flags.uninstall {
            args.push("-u".into());
        }
        if !self.flags.reinstall_boot {
            args.push("--no-boot".into());
        }
        if !self.flags.show_exit_screen {
            args.push("--update".into());
        }
        args
    }
}
