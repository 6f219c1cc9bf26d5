//! Linux adapter: `pkexec` for elevation, POSIX modes for repair.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use sine_core::{ElevationRequest, OsKind, PlatformPort, PlatformResult, SpecialDirs};

use super::common::{config_overrides, default_downloads_dir, is_process_running};
use super::posix;

/// Session variables forwarded to the privileged child so it can open a
/// window and resolve the same home directory.
const FORWARDED_ENV: &[&str] = &["DISPLAY", "XAUTHORITY", "HOME"];

/// Arguments to `pkexec`. pkexec starts the child with a scrubbed
/// environment, so the session variables and installer overrides visible
/// through `lookup` are restored with `env KEY=VALUE`.
fn pkexec_args(
    exe: &Path,
    request: &ElevationRequest,
    lookup: impl Fn(&str) -> Option<OsString>,
) -> Vec<OsString> {
    let session = FORWARDED_ENV
        .iter()
        .filter_map(|&key| lookup(key).map(|value| (key, value)));
    let overrides = config_overrides(&lookup);

    let mut args: Vec<OsString> = vec!["--disable-internal-agent".into(), "env".into()];
    for (key, value) in session.chain(overrides) {
        let mut assignment = OsString::from(format!("{key}="));
        assignment.push(value);
        args.push(assignment);
    }
    args.push(exe.as_os_str().to_owned());
    args.extend(request.to_args());
    args
}

/// Linux implementation of [`PlatformPort`].
#[derive(Debug, Clone, Copy)]
pub struct LinuxPlatform;

impl LinuxPlatform {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformPort for LinuxPlatform {
    fn os(&self) -> OsKind {
        OsKind::Linux
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

    /// `pkexec --disable-internal-agent env DISPLAY=.. SINE_..=.. <exe> <args>`
    ///
    /// Blocks until the privileged child exits.
    fn relaunch_elevated(&self, request: &ElevationRequest) -> PlatformResult<()> {
        let exe = posix::current_exe()?;
        let mut command = Command::new("pkexec");
        command.args(pkexec_args(&exe, request, |key| std::env::var_os(key)));

        tracing::info!(exe = %exe.display(), "Relaunching through pkexec");
        posix::run_to_completion(&mut command, "pkexec")
    }
}
