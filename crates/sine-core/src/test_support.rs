//! In-memory platform adapter for unit tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::catalog::OsKind;
use crate::elevation::ElevationRequest;
use crate::paths::SpecialDirs;
use crate::ports::{PlatformError, PlatformPort, PlatformResult};

pub struct FakePlatform {
    pub os: OsKind,
    pub dirs: SpecialDirs,
    pub downloads: PathBuf,
    pub admin: bool,
    pub relaunch_succeeds: Mutex<bool>,
    pub unwritable: Mutex<Vec<PathBuf>>,
    pub running: Mutex<Vec<String>>,
    pub relaunches: Mutex<Vec<ElevationRequest>>,
    pub repaired: Mutex<Vec<PathBuf>>,
}

impl FakePlatform {
    pub fn new(home: &Path, downloads: &Path) -> Self {
        Self {
            os: OsKind::Linux,
            dirs: SpecialDirs::rooted_at(home, OsKind::Linux),
            downloads: downloads.to_path_buf(),
            admin: false,
            relaunch_succeeds: Mutex::new(true),
            unwritable: Mutex::new(Vec::new()),
            running: Mutex::new(Vec::new()),
            relaunches: Mutex::new(Vec::new()),
            repaired: Mutex::new(Vec::new()),
        }
    }

    pub fn deny_writes(&self, path: &Path) {
        self.unwritable.lock().unwrap().push(path.to_path_buf());
    }

    pub fn set_running(&self, process: &str, running: bool) {
        let mut list = self.running.lock().unwrap();
        list.retain(|p| p != process);
        if running {
            list.push(process.to_string());
        }
    }
}

impl PlatformPort for FakePlatform {
    fn os(&self) -> OsKind {
        self.os
    }

    fn special_dirs(&self) -> SpecialDirs {
        self.dirs.clone()
    }

    fn downloads_dir(&self) -> PathBuf {
        self.downloads.clone()
    }

    fn is_admin(&self) -> bool {
        self.admin
    }

    fn is_writable(&self, dir: &Path) -> bool {
        !self.unwritable.lock().unwrap().iter().any(|p| p == dir)
    }

    fn repair_permissions(&self, path: &Path) -> PlatformResult<()> {
        self.repaired.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn is_running(&self, process_name: &str) -> bool {
        self.running.lock().unwrap().iter().any(|p| p == process_name)
    }

    fn relaunch_elevated(&self, request: &ElevationRequest) -> PlatformResult<()> {
        self.relaunches.lock().unwrap().push(request.clone());
        if *self.relaunch_succeeds.lock().unwrap() {
            Ok(())
        } else {
            Err(PlatformError::CommandRejected {
                command: "pkexec".into(),
                status: "exit status: 126".into(),
            })
        }
    }
}
