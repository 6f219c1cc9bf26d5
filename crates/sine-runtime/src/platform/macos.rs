//! macOS adapter: `osascript` administrator prompt for elevation.

use std::path::{Path, PathBuf};
use std::process::Command;

use sine_core::{ElevationRequest, OsKind, PlatformPort, PlatformResult, SpecialDirs};

use super::common::{config_overrides, default_downloads_dir, is_process_running};
use super::posix;
use super::quote::applescript_escape;

/// macOS implementation of [`PlatformPort`].
#[derive(Debug, Clone, Copy)]
pub struct MacPlatform;

impl MacPlatform {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MacPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformPort for MacPlatform {
    fn os(&self) -> OsKind {
        OsKind::MacOs
    }

    fn special_dirs(&self) -> SpecialDirs {
        SpecialDirs::detect()
    }

    fn downloads_dir(&self) -> PathBuf {
        default_downloads_dir()
    }

    fn is_admin(&self) -> bool {
        posix::is_root()
    }

    fn repair_permissions(&self, path: &Path) -> PlatformResult<()> {
        posix::repair_mode(path)
    }

    fn is_running(&self, process_name: &str) -> bool {
        is_process_running(process_name)
    }

    /// Runs `do shell script ".." with administrator privileges` and waits
    /// for the privileged run to finish. The privileged shell starts from a
    /// clean environment, so installer overrides are passed through `env`.
    fn relaunch_elevated(&self, request: &ElevationRequest) -> PlatformResult<()> {
        let exe = posix::current_exe()?;
        let overrides = config_overrides(|key| std::env::var_os(key));
        let command_line = posix::shell_command_line(&exe, request, &overrides);
        let script = format!(
            "do shell script \"{}\" with administrator privileges",
            applescript_escape(&command_line)
        );

        tracing::info!(exe = %exe.display(), "Relaunching through osascript");
        posix::run_to_completion(Command::new("osascript").args(["-e", &script]), "osascript")
    }
}
