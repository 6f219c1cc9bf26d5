//! Helpers every platform adapter shares.

use std::ffi::OsString;
use std::path::PathBuf;

use sine_core::config::ENV_KEYS;
use sysinfo::System;

/// Staging folder for downloaded archives: the user's download directory,
/// else `~/Downloads`, else the temp directory.
pub fn default_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(std::env::temp_dir)
}

/// Point-in-time scan of the process table for `process_name`.
///
/// Names compare case-insensitively; Windows reports `Firefox.exe` and
/// `firefox.exe` interchangeably.
pub fn is_process_running(process_name: &str) -> bool {
    let sys = System::new_all();
    let running = sys
        .processes()
        .values()
        .any(|process| process.name().eq_ignore_ascii_case(process_name));
    tracing::debug!(process = process_name, running, "Process liveness check");
    running
}

/// Installer overrides set for this process, as `(key, value)` pairs.
pub fn config_overrides(
    lookup: impl Fn(&str) -> Option<OsString>,
) -> Vec<(&'static str, OsString)> {
    ENV_KEYS
        .iter()
        .filter_map(|&key| lookup(key).map(|value| (key, value)))
        .collect()
}
