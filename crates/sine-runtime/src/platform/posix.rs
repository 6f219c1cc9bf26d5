//! Behaviour shared by the Linux and macOS adapters.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use sine_core::{PlatformError, PlatformResult};

#[cfg(any(target_os = "macos", test))]
use super::quote::shell_single_quote;
#[cfg(any(target_os = "macos", test))]
use sine_core::ElevationRequest;
#[cfg(any(target_os = "macos", test))]
use std::ffi::OsString;

const DIR_MODE: u32 = 0o755;
const FILE_MODE: u32 = 0o644;

/// Directories become `rwxr-xr-x`, regular files `rw-r--r--`. Symlinks and
/// other special files are left alone.
pub fn repair_mode(path: &Path) -> PlatformResult<()> {
    let meta = fs::symlink_metadata(path)?;
    let mode = if meta.is_dir() {
        DIR_MODE
    } else if meta.is_file() {
        FILE_MODE
    } else {
        return Ok(());
    };

    let mut perms = meta.permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms)?;
    Ok(())
}

pub fn is_root() -> bool {
    nix::unistd::geteuid().is_root()
}

pub fn current_exe() -> PlatformResult<PathBuf> {
    std::env::current_exe().map_err(PlatformError::from)
}

/// `[env KEY=VALUE...] <exe> <args...>`, each word single-quoted for `sh`.
#[cfg(any(target_os = "macos", test))]
pub fn shell_command_line(
    exe: &Path,
    request: &ElevationRequest,
    env: &[(&str, OsString)],
) -> String {
    let assignments = env.iter().map(|(key, value)| {
        let mut word = OsString::from(format!("{key}="));
        word.push(value);
        word
    });
    let words: Vec<String> = assignments
        .chain(std::iter::once(exe.as_os_str().to_owned()))
        .chain(request.to_args())
        .map(|word| shell_single_quote(&word.to_string_lossy()))
        .collect();
    if env.is_empty() {
        words.join(" ")
    } else {
        format!("env {}", words.join(" "))
    }
}

/// Run a helper to completion; success means exit status 0.
pub fn run_to_completion(command: &mut Command, label: &str) -> PlatformResult<()> {
    let status = command
        .status()
        .map_err(|e| PlatformError::command_failed(label, e))?;
    if status.success() {
        Ok(())
    } else {
        Err(PlatformError::CommandRejected {
            command: label.to_string(),
            status: status.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sine_core::InstallFlags;
    use tempfile::TempDir;

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn directories_get_755_and_files_644() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("chrome");
        let file = sub.join("userChrome.css");
        fs::create_dir(&sub).unwrap();
        fs::write(&file, "/* */").unwrap();
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o700)).unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o600)).unwrap();

        repair_mode(&sub).unwrap();
        repair_mode(&file).unwrap();

        assert_eq!(mode_of(&sub), 0o755);
        assert_eq!(mode_of(&file), 0o644);
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(repair_mode(&dir.path().join("gone")).is_err());
    }

    #[test]
    fn command_line_quotes_every_word() {
        let request = ElevationRequest::new(
            "/opt/fire fox",
            "/home/u/.mozilla/firefox/x.default",
            InstallFlags {
                uninstall: true,
                ..InstallFlags::default()
            },
        );
        assert_eq!(
            shell_command_line(Path::new("/usr/bin/sine-installer"), &request, &[]),
            "'/usr/bin/sine-installer' '--browser' '/opt/fire fox' '--profile' \
             '/home/u/.mozilla/firefox/x.default' '-u'"
        );
    }

    #[test]
    fn command_line_carries_overrides_through_env() {
        let request =
            ElevationRequest::new("/Applications/Firefox.app", "/p", InstallFlags::default());
        let env = [
            ("SINE_VERSION", OsString::from("3.0")),
            ("SINE_ENGINE_URL", OsString::from("http://mirror/it's")),
        ];
        assert_eq!(
            shell_command_line(Path::new("/bin/sine"), &request, &env),
            "env 'SINE_VERSION=3.0' 'SINE_ENGINE_URL=http://mirror/it'\\''s' '/bin/sine' \
             '--browser' '/Applications/Firefox.app' '--profile' '/p'"
        );
    }
}
