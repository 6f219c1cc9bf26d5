//! Windows adapter: UAC prompt through PowerShell, `icacls` for ownership.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sine_core::{
    ElevationRequest, OsKind, PlatformError, PlatformPort, PlatformResult, SpecialDirs,
};

use super::common::{config_overrides, default_downloads_dir, is_process_running};
use super::quote::runas_script;

/// Windows implementation of [`PlatformPort`].
#[derive(Debug, Clone, Copy)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

/// `DOMAIN\user` of the account running this process.
fn current_account() -> Option<String> {
    let user = std::env::var("USERNAME").ok()?;
    Some(match std::env::var("USERDOMAIN") {
        Ok(domain) if !domain.is_empty() => format!("{domain}\\{user}"),
        _ => user,
    })
}

fn run(command: &mut Command, label: &str) -> PlatformResult<()> {
    let output = command
        .output()
        .map_err(|e| PlatformError::command_failed(label, e))?;
    if output.status.success() {
        Ok(())
    } else {
        Err(PlatformError::CommandRejected {
            command: label.to_string(),
            status: output.status.to_string(),
        })
    }
}

impl PlatformPort for WindowsPlatform {
    fn os(&self) -> OsKind {
        OsKind::Windows
    }

    fn special_dirs(&self) -> SpecialDirs {
        SpecialDirs::detect()
    }

    fn downloads_dir(&self) -> PathBuf {
        default_downloads_dir()
    }

    /// `net session` only succeeds from an elevated token.
    fn is_admin(&self) -> bool {
        Command::new("net")
            .arg("session")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn repair_permissions(&self, path: &Path) -> PlatformResult<()> {
        let mut perms = fs::metadata(path)?.permissions();
        if perms.readonly() {
            perms.set_readonly(false);
            fs::set_permissions(path, perms)?;
        }

        let account = current_account()
            .ok_or_else(|| PlatformError::Unsupported("USERNAME is not set".to_string()))?;
        run(
            Command::new("icacls").arg(path).arg("/setowner").arg(account),
            "icacls",
        )
    }

    fn is_running(&self, process_name: &str) -> bool {
        is_process_running(process_name)
    }

    /// `Start-Process -Verb RunAs`. Returns once the UAC prompt is
    /// accepted; the elevated instance carries on alone.
    fn relaunch_elevated(&self, request: &ElevationRequest) -> PlatformResult<()> {
        let exe = std::env::current_exe()?;
        let args: Vec<String> = request
            .to_args()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        let overrides: Vec<(&str, String)> = config_overrides(|key| std::env::var_os(key))
            .into_iter()
            .map(|(key, value)| (key, value.to_string_lossy().into_owned()))
            .collect();
        let script = runas_script(&exe.to_string_lossy(), &args, &overrides);

        tracing::info!(exe = %exe.display(), "Relaunching through UAC");
        run(
            Command::new("powershell").args(["-NoProfile", "-NonInteractive", "-Command", &script]),
            "powershell",
        )
    }
}
