//! Archive pipeline port: fetch release archives and unpack them.

use std::path::Path;

use async_trait::async_trait;

use crate::error::InstallResult;

/// Port for the download-and-extract pipeline.
///
/// Both operations complete (or fail) before returning; the executor runs
/// at most one of them per step.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchivePort: Send + Sync {
    /// Stream `url` into `dest`, replacing any previous content.
    ///
    /// A failed transfer may leave a partial file behind.
    async fn fetch(&self, url: &str, dest: &Path) -> InstallResult<()>;

    /// Unpack `archive` into `dest_dir`, creating it if needed.
    ///
    /// Entries are written in archive order. A malformed archive leaves
    /// whatever was written so far in place.
    fn extract(&self, archive: &Path, dest_dir: &Path) -> InstallResult<()>;
}
