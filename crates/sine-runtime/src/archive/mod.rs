//! Archive pipeline: HTTP fetch and zip extraction.
//!
//! [`ArchivePipeline`] implements `ArchivePort` from sine-core. Every file
//! and directory it creates is passed through the platform adapter's
//! permission repair before the pipeline moves on.

mod extract;
mod fetch;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use sine_core::{ArchivePort, InstallResult, PlatformPort};

pub use extract::extract_archive;
pub use fetch::{USER_AGENT, download_to_file};

/// HTTP + zip implementation of [`ArchivePort`].
pub struct ArchivePipeline {
    client: reqwest::Client,
    platform: Arc<dyn PlatformPort>,
}

impl ArchivePipeline {
    pub fn new(platform: Arc<dyn PlatformPort>) -> Self {
        Self::with_client(reqwest::Client::new(), platform)
    }

    /// Use a preconfigured client (proxy settings, timeouts).
    pub fn with_client(client: reqwest::Client, platform: Arc<dyn PlatformPort>) -> Self {
        Self { client, platform }
    }

    fn repair(&self, path: &Path) {
        if let Err(e) = self.platform.repair_permissions(path) {
            tracing::warn!(path = %path.display(), error = %e, "Could not repair permissions");
        }
    }
}

#[async_trait]
impl ArchivePort for ArchivePipeline {
    async fn fetch(&self, url: &str, dest: &Path) -> InstallResult<()> {
        download_to_file(&self.client, url, dest).await?;
        self.repair(dest);
        Ok(())
    }

    fn extract(&self, archive: &Path, dest_dir: &Path) -> InstallResult<()> {
        extract_archive(archive, dest_dir, |created| self.repair(created))
    }
}
