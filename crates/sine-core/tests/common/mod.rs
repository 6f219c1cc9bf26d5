//! Hand-written fakes shared by integration tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use sine_core::catalog::OsKind;
use sine_core::paths::SpecialDirs;
use sine_core::{
    ArchivePort, ElevationRequest, InstallResult, PlatformError, PlatformPort, PlatformResult,
};

pub struct StubPlatform {
    pub dirs: SpecialDirs,
    pub downloads: PathBuf,
    pub relaunches: Mutex<Vec<ElevationRequest>>,
}

impl StubPlatform {
    pub fn new(home: &Path, downloads: &Path) -> Self {
        Self {
            dirs: SpecialDirs::rooted_at(home, OsKind::Linux),
            downloads: downloads.to_path_buf(),
            relaunches: Mutex::new(Vec::new()),
        }
    }
}

impl PlatformPort for StubPlatform {
    fn os(&self) -> OsKind {
        OsKind::Linux
    }

    fn special_dirs(&self) -> SpecialDirs {
        self.dirs.clone()
    }

    fn downloads_dir(&self) -> PathBuf {
        self.downloads.clone()
    }

    fn is_admin(&self) -> bool {
        false
    }

    fn repair_permissions(&self, _path: &Path) -> PlatformResult<()> {
        Ok(())
    }

    fn is_running(&self, _process_name: &str) -> bool {
        false
    }

    fn relaunch_elevated(&self, request: &ElevationRequest) -> PlatformResult<()> {
        self.relaunches.lock().unwrap().push(request.clone());
        Err(PlatformError::Unsupported("stub".into()))
    }
}

/// Records calls and succeeds without touching the network.
#[derive(Default)]
pub struct RecordingArchives {
    pub fetched: Mutex<Vec<String>>,
    pub extracted: Mutex<Vec<(PathBuf, PathBuf)>>,
}

#[async_trait]
impl ArchivePort for RecordingArchives {
    async fn fetch(&self, url: &str, _dest: &Path) -> InstallResult<()> {
        self.fetched.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn extract(&self, archive: &Path, dest_dir: &Path) -> InstallResult<()> {
        self.extracted
            .lock()
            .unwrap()
            .push((archive.to_path_buf(), dest_dir.to_path_buf()));
        Ok(())
    }
}
