//! Platform adapter port for OS-specific operations.
//!
//! This port abstracts privilege checks, permission repair, process
//! liveness and privileged relaunch from the core domain. Implementations
//! live in adapters (e.g., sine-runtime), one per target OS.
//!
//! # Design Notes
//!
//! - Core owns the trait and types (pure)
//! - Runtime owns the implementation (`Command::new`, `sysinfo`, `nix`)
//! - The CLI picks the implementation at startup and injects it

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::OsKind;
use crate::elevation::ElevationRequest;
use crate::paths::{SpecialDirs, is_writable};

/// Errors that can occur in platform operations.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A helper command could not be started.
    #[error("Failed to run {command}: {reason}")]
    CommandFailed { command: String, reason: String },

    /// A helper command ran but reported failure.
    #[error("{command} exited with {status}")]
    CommandRejected { command: String, status: String },

    /// Filesystem error while repairing permissions.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation is not available on this platform.
    #[error("Not supported on this platform: {0}")]
    Unsupported(String),
}

impl PlatformError {
    pub fn command_failed(command: &str, reason: impl ToString) -> Self {
        Self::CommandFailed {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Port for OS-specific operations used by the executor and wizard.
pub trait PlatformPort: Send + Sync {
    /// The OS this adapter serves.
    fn os(&self) -> OsKind;

    /// Base directories of the current user.
    fn special_dirs(&self) -> SpecialDirs;

    /// Folder where archives are staged before extraction.
    fn downloads_dir(&self) -> PathBuf;

    /// Whether the process already runs with administrator rights.
    fn is_admin(&self) -> bool;

    /// Whether the current user can write into `dir`.
    fn is_writable(&self, dir: &Path) -> bool {
        is_writable(dir)
    }

    /// Normalise mode/ownership of a freshly created file or directory so
    /// the browser, running as the user, can read it.
    ///
    /// Best-effort: callers log failures and carry on.
    fn repair_permissions(&self, path: &Path) -> PlatformResult<()>;

    /// Point-in-time check for a running process with this name.
    fn is_running(&self, process_name: &str) -> bool;

    /// Relaunch this program with elevated rights, passing `request` as
    /// arguments. `Ok` means the privileged instance took over and this one
    /// should exit.
    fn relaunch_elevated(&self, request: &ElevationRequest) -> PlatformResult<()>;
}
