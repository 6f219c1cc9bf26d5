//! Path-related error types.
//!
//! Messages are shown verbatim next to the path inputs of the wizard.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during path resolution and validation.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the user's home directory.
    #[error("Cannot determine home directory")]
    NoHomeDir,

    /// Could not determine the per-user application data directory.
    #[error("Cannot determine application data directory")]
    NoAppDataDir,

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,

    /// The path does not exist.
    #[error("Path does not exist.")]
    NotFound(PathBuf),

    /// A path was expected to be a directory but was not.
    #[error("Path should be a folder, not a file.")]
    NotADirectory(PathBuf),

    /// The install directory lacks the `browser` subdirectory.
    #[error("Path should contain browser-like contents.")]
    NotABrowserDir(PathBuf),

    /// The user pointed at the parent of the profiles folder.
    #[error("Path should be the profiles folder, not contain it.")]
    ProfilesParent(PathBuf),

    /// The profile root contains no selectable profile.
    #[error("No profiles were found in {0}")]
    NoProfiles(PathBuf),
}
