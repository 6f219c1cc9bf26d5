//! Error types for install runs.
//!
//! Every variant is surfaced to the user as a blocking message at the
//! current step. None of them ends the process.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::paths::PathError;

/// Coarse classification of an [`InstallError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PathNotFound,
    PermissionDenied,
    NetworkFailure,
    ArchiveCorruption,
    ProcessConflict,
    ElevationRefused,
    Io,
}

/// Errors that can occur while running an install plan.
#[derive(Debug, Error)]
pub enum InstallError {
    // === Paths ===
    /// The selected browser or profile path does not exist
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// A write was refused by the filesystem
    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// Path resolution or validation failed
    #[error(transparent)]
    Path(#[from] PathError),

    // === Archives ===
    /// Fetching an archive failed (transport error or non-success status)
    #[error("Failed to download {url}: {reason}")]
    NetworkFailure { url: String, reason: String },

    /// An archive could not be read
    #[error("Failed to extract {}: {reason}", archive.display())]
    ArchiveCorruption { archive: PathBuf, reason: String },

    // === Guards ===
    /// The target browser is running
    #[error("Please close your browser before installing ({process} is running).")]
    ProcessConflict { process: String },

    /// The privileged relaunch was declined or failed
    #[error("Failed to gain required privileges: {0}")]
    ElevationRefused(String),

    // === IO ===
    /// Other filesystem failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    /// Wrap an I/O error, promoting the permission and not-found cases to
    /// their dedicated variants.
    pub fn io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            io::ErrorKind::NotFound => Self::PathNotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub fn network(url: &str, reason: impl ToString) -> Self {
        Self::NetworkFailure {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn corrupt(archive: &Path, reason: impl ToString) -> Self {
        Self::ArchiveCorruption {
            archive: archive.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PathNotFound(_) | Self::Path(_) => ErrorKind::PathNotFound,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::NetworkFailure { .. } => ErrorKind::NetworkFailure,
            Self::ArchiveCorruption { .. } => ErrorKind::ArchiveCorruption,
            Self::ProcessConflict { .. } => ErrorKind::ProcessConflict,
            Self::ElevationRefused(_) => ErrorKind::ElevationRefused,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Whether the user can resolve the condition and retry the step.
    ///
    /// Always true: the process never aborts on an install error.
    pub const fn is_recoverable(&self) -> bool {
        true
    }
}

pub type InstallResult<T> = Result<T, InstallError>;
