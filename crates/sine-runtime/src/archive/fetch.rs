//! Streaming HTTP download.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use sine_core::{InstallError, InstallResult};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

pub const USER_AGENT: &str = concat!("sine-installer/", env!("CARGO_PKG_VERSION"));

/// Stream `url` into `dest`, truncating any previous content.
///
/// Redirects are followed by the client. A non-2xx status fails before
/// `dest` is touched; a transport error mid-body leaves the partial file
/// behind.
pub async fn download_to_file(client: &Client, url: &str, dest: &Path) -> InstallResult<()> {
    tracing::info!(url, dest = %dest.display(), "Downloading archive");

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .map_err(|e| InstallError::network(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(InstallError::network(url, format!("HTTP {status}")));
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| InstallError::io(parent, e))?;
    }

    let mut file = File::create(dest)
        .await
        .map_err(|e| InstallError::io(dest, e))?;

    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| InstallError::network(url, e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| InstallError::io(dest, e))?;
        downloaded += chunk.len() as u64;
    }
    file.flush().await.map_err(|e| InstallError::io(dest, e))?;

    tracing::debug!(url, bytes = downloaded, "Download complete");
    Ok(())
}
