//! CLI-specific error types and exit codes.

use sine_core::{ConfigError, ErrorKind, InstallError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The run stopped on an install error the user chose not to retry.
    #[error("{0}")]
    Install(String),

    /// Argument or input error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (terminal, missing paths).
    #[error("IO error: {0}")]
    Io(String),

    /// Missing privileges.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Environment configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to an exit code (sysexits.h where one fits).
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Install(_) => 1,
            Self::Arguments(_) => 2,   // EX_USAGE
            Self::Io(_) => 74,         // EX_IOERR
            Self::Permission(_) => 77, // EX_NOPERM
            Self::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<InstallError> for CliError {
    fn from(err: InstallError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::PermissionDenied | ErrorKind::ElevationRefused => Self::Permission(message),
            ErrorKind::PathNotFound | ErrorKind::Io => Self::Io(message),
            ErrorKind::NetworkFailure
            | ErrorKind::ArchiveCorruption
            | ErrorKind::ProcessConflict => Self::Install(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
