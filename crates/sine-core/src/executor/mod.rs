//! Cooperative plan execution.
//!
//! The presentation layer calls [`PlanExecutor::advance`] once per frame.
//! Each call does at most one step of work, after checking that the run has
//! the privileges it needs and that the target browser is closed.

mod actions;

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::InstallerConfig;
use crate::elevation::{ElevationGate, ElevationRequest, ElevationState, needs_admin};
use crate::error::InstallError;
use crate::paths::ResolvedInstallContext;
use crate::plan::{InstallFlags, InstallPlan, StepKind, build_plan, effective_flags};
use crate::ports::{ArchivePort, PlatformPort};
use crate::profile::LegacyInstall;

/// Why a call to `advance` did no work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// The target browser is open; poll again next frame.
    BrowserRunning { process: String },
    /// Privileges are missing and the relaunch failed. Call
    /// [`PlanExecutor::retry_elevation`] to try again.
    ElevationFailed,
}

impl BlockReason {
    pub fn to_error(&self) -> InstallError {
        match self {
            Self::BrowserRunning { process } => InstallError::ProcessConflict {
                process: process.clone(),
            },
            Self::ElevationFailed => {
                InstallError::ElevationRefused("privileged relaunch did not start".to_string())
            }
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrowserRunning { .. } => f.write_str("Please close your browser before installing."),
            Self::ElevationFailed => f.write_str("Failed to gain required privileges."),
        }
    }
}

/// Result of one `advance` call.
#[derive(Debug)]
pub enum AdvanceOutcome {
    /// A step ran and the cursor moved on.
    Ran { index: usize, step: StepKind },
    /// The terminal step has been reached. Repeated calls keep returning this.
    Completed,
    /// A guard failed; nothing was done.
    Blocked(BlockReason),
    /// A privileged instance took over; this process should exit.
    HandedOff,
    /// The step failed; the cursor stays so the same step runs on retry.
    Failed {
        index: usize,
        step: StepKind,
        error: InstallError,
    },
}

/// Drives an [`InstallPlan`] one step per call.
pub struct PlanExecutor {
    context: ResolvedInstallContext,
    flags: InstallFlags,
    plan: InstallPlan,
    config: InstallerConfig,
    downloads_dir: PathBuf,
    platform: Arc<dyn PlatformPort>,
    archives: Arc<dyn ArchivePort>,
    gate: ElevationGate,
    prepared: bool,
    completed: bool,
}

impl PlanExecutor {
    pub fn new(
        context: ResolvedInstallContext,
        flags: InstallFlags,
        legacy: &LegacyInstall,
        config: InstallerConfig,
        platform: Arc<dyn PlatformPort>,
        archives: Arc<dyn ArchivePort>,
    ) -> Self {
        let flags = effective_flags(&flags, legacy);
        let plan = build_plan(&flags, legacy);
        let downloads_dir = config
            .downloads_dir
            .clone()
            .unwrap_or_else(|| platform.downloads_dir());

        if context.browser.is_none() {
            tracing::warn!(
                browser_path = %context.browser_path.display(),
                "Browser not recognised; running-browser check disabled"
            );
        }
        tracing::info!(
            steps = plan.len(),
            uninstall = flags.uninstall,
            reinstall_boot = flags.reinstall_boot,
            save_data = flags.save_data,
            "Built install plan"
        );

        Self {
            context,
            flags,
            plan,
            config,
            downloads_dir,
            platform,
            archives,
            gate: ElevationGate::new(),
            prepared: false,
            completed: false,
        }
    }

    pub const fn plan(&self) -> &InstallPlan {
        &self.plan
    }

    pub const fn flags(&self) -> &InstallFlags {
        &self.flags
    }

    pub const fn context(&self) -> &ResolvedInstallContext {
        &self.context
    }

    pub const fn elevation_state(&self) -> ElevationState {
        self.gate.state()
    }

    pub const fn is_complete(&self) -> bool {
        self.completed
    }

    /// Progress fraction and the label of the current step.
    pub fn progress(&self) -> (f32, &'static str) {
        (self.plan.progress(), self.plan.current().label())
    }

    /// Arguments for a privileged instance that resumes this run.
    pub fn elevation_request(&self) -> ElevationRequest {
        ElevationRequest::new(
            self.context.browser_path.clone(),
            self.context.profile_path.clone(),
            self.flags,
        )
    }

    /// Arm one more relaunch attempt after [`BlockReason::ElevationFailed`].
    pub fn retry_elevation(&mut self) -> bool {
        self.gate.retry()
    }

    /// Run at most one step.
    pub async fn advance(&mut self) -> AdvanceOutcome {
        if self.completed {
            return AdvanceOutcome::Completed;
        }
        if !self.prepared
            && let Err(error) = self.check_targets()
        {
            tracing::error!(error = %error, "Install target missing");
            let (index, step) = (self.plan.cursor(), self.plan.current());
            return AdvanceOutcome::Failed { index, step, error };
        }

        let platform = Arc::clone(&self.platform);
        let (browser_path, profile_path) = (&self.context.browser_path, &self.context.profile_path);
        let flags = self.flags;
        self.gate.evaluate(
            || needs_admin(platform.as_ref(), browser_path, profile_path, &flags),
            || platform.is_admin(),
        );

        let running = self.running_browser();
        if self.gate.has_permissions() && (running.is_none() || !self.flags.show_exit_screen) {
            return self.run_current().await;
        }

        if let Some(process) = running.filter(|_| self.flags.show_exit_screen) {
            tracing::debug!(process, "Waiting for browser to close");
            return AdvanceOutcome::Blocked(BlockReason::BrowserRunning { process });
        }

        let request = self.elevation_request();
        match self.gate.attempt(|| platform.relaunch_elevated(&request)) {
            ElevationState::Elevated => AdvanceOutcome::HandedOff,
            _ => AdvanceOutcome::Blocked(BlockReason::ElevationFailed),
        }
    }

    fn running_browser(&self) -> Option<String> {
        let process = self.context.process_name(self.platform.os())?;
        self.platform.is_running(&process).then_some(process)
    }

    async fn run_current(&mut self) -> AdvanceOutcome {
        let index = self.plan.cursor();
        let step = self.plan.current();

        if !self.prepared {
            if let Err(error) = self.prepare() {
                tracing::error!(error = %error, "Could not prepare profile");
                return AdvanceOutcome::Failed { index, step, error };
            }
            self.prepared = true;
        }

        tracing::info!(index, step = %step, "Running step");
        match self.run_step(step).await {
            Ok(()) if step.is_terminal() => {
                self.completed = true;
                tracing::info!("Install plan complete");
                AdvanceOutcome::Completed
            }
            Ok(()) => {
                self.plan.advance_cursor();
                AdvanceOutcome::Ran { index, step }
            }
            Err(error) => {
                tracing::error!(index, step = %step, error = %error, "Step failed");
                AdvanceOutcome::Failed { index, step, error }
            }
        }
    }

    /// Both target folders must already exist. A missing one is reported
    /// as such instead of being escalated or created.
    fn check_targets(&self) -> Result<(), InstallError> {
        [&self.context.browser_path, &self.context.profile_path]
            .into_iter()
            .find(|path| !path.is_dir())
            .map_or(Ok(()), |path| Err(InstallError::PathNotFound(path.clone())))
    }

    /// Make sure `<profile>/chrome` exists before any step touches it.
    fn prepare(&self) -> Result<(), InstallError> {
        let chrome = self.context.chrome_dir();
        if !chrome.is_dir() {
            fs::create_dir_all(&chrome).map_err(|e| InstallError::io(&chrome, e))?;
            self.repair(&chrome);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_browser;
    use crate::error::ErrorKind;
    use crate::plan::ArchiveKind;
    use crate::ports::MockArchivePort;
    use crate::test_support::FakePlatform;
    use std::path::Path;
    use tempfile::TempDir;

    struct Fixture {
        _root: TempDir,
        browser: PathBuf,
        profile: PathBuf,
        platform: Arc<FakePlatform>,
    }

    fn fixture() -> Fixture {
        let root = TempDir::new().unwrap();
        let browser = root.path().join("opt").join("firefox");
        let profile = root.path().join("home").join(".mozilla").join("firefox").join("abc.default");
        let downloads = root.path().join("downloads");
        for dir in [&browser, &profile, &downloads] {
            fs::create_dir_all(dir).unwrap();
        }
        let platform = Arc::new(FakePlatform::new(&root.path().join("home"), &downloads));
        Fixture {
            _root: root,
            browser,
            profile,
            platform,
        }
    }

    fn executor(fx: &Fixture, flags: InstallFlags, archives: MockArchivePort) -> PlanExecutor {
        let context = ResolvedInstallContext::new(&fx.browser, &fx.profile)
            .with_browser(find_browser("Firefox").unwrap(), Some("Stable".into()));
        let legacy = LegacyInstall::Present {
            version: None,
            has_mods: false,
        };
        PlanExecutor::new(
            context,
            flags,
            &legacy,
            InstallerConfig::default(),
            fx.platform.clone(),
            Arc::new(archives),
        )
    }

    fn uninstall() -> InstallFlags {
        InstallFlags {
            uninstall: true,
            ..InstallFlags::default()
        }
    }

    #[tokio::test]
    async fn uninstall_runs_to_completion_and_stays_complete() {
        let fx = fixture();
        let chrome = fx.profile.join("chrome");
        fs::create_dir_all(chrome.join("JS")).unwrap();
        fs::create_dir_all(chrome.join("sine-mods").join("mod-a")).unwrap();
        fs::create_dir_all(fx.browser.join("defaults").join("pref")).unwrap();
        fs::write(fx.browser.join("defaults").join("pref").join("config-prefs.js"), "").unwrap();
        fs::write(fx.browser.join("config.js"), "").unwrap();
        let cache = fx.platform.dirs.cache.clone().unwrap().join("mozilla/firefox/abc.default/startupCache");
        fs::create_dir_all(&cache).unwrap();

        let mut exec = executor(&fx, uninstall(), MockArchivePort::new());
        let mut ran = Vec::new();
        loop {
            match exec.advance().await {
                AdvanceOutcome::Ran { step, .. } => ran.push(step),
                AdvanceOutcome::Completed => break,
                other => panic!("unexpected {other:?}"),
            }
        }

        assert_eq!(
            ran,
            vec![
                StepKind::CleanBrowser,
                StepKind::CleanProfile,
                StepKind::RemoveMods,
                StepKind::ClearStartupCache
            ]
        );
        assert!(!fx.browser.join("config.js").exists());
        assert!(!fx.browser.join("defaults/pref/config-prefs.js").exists());
        assert!(!chrome.join("JS").exists());
        assert!(!chrome.join("sine-mods").exists());
        assert!(!cache.exists());

        let cursor = exec.plan().cursor();
        assert!(matches!(exec.advance().await, AdvanceOutcome::Completed));
        assert_eq!(exec.plan().cursor(), cursor);
        assert!(cursor < exec.plan().len());
    }

    #[tokio::test]
    async fn creates_chrome_folder_before_first_step() {
        let fx = fixture();
        let mut exec = executor(&fx, uninstall(), MockArchivePort::new());
        assert!(!fx.profile.join("chrome").exists());

        exec.advance().await;
        assert!(fx.profile.join("chrome").is_dir());
        assert!(fx.platform.repaired.lock().unwrap().contains(&fx.profile.join("chrome")));
    }

    #[tokio::test]
    async fn running_browser_blocks_until_closed() {
        let fx = fixture();
        fx.platform.set_running("firefox", true);
        let mut exec = executor(&fx, uninstall(), MockArchivePort::new());

        for _ in 0..3 {
            match exec.advance().await {
                AdvanceOutcome::Blocked(BlockReason::BrowserRunning { process }) => {
                    assert_eq!(process, "firefox");
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(exec.plan().cursor(), 0);

        fx.platform.set_running("firefox", false);
        assert!(matches!(
            exec.advance().await,
            AdvanceOutcome::Ran { index: 0, .. }
        ));
    }

    #[tokio::test]
    async fn update_mode_ignores_running_browser() {
        let fx = fixture();
        fx.platform.set_running("firefox", true);
        let flags = InstallFlags {
            show_exit_screen: false,
            ..uninstall()
        };
        let mut exec = executor(&fx, flags, MockArchivePort::new());
        assert!(matches!(exec.advance().await, AdvanceOutcome::Ran { .. }));
    }

    #[tokio::test]
    async fn failed_download_keeps_cursor() {
        let fx = fixture();
        let mut archives = MockArchivePort::new();
        archives
            .expect_fetch()
            .times(2)
            .returning(|url, _| Err(InstallError::network(url, "connection refused")));

        let mut exec = executor(&fx, InstallFlags::default(), archives);
        for _ in 0..2 {
            match exec.advance().await {
                AdvanceOutcome::Failed { index, step, error } => {
                    assert_eq!(index, 0);
                    assert_eq!(step, StepKind::DownloadArchive(ArchiveKind::Program));
                    assert_eq!(error.kind(), ErrorKind::NetworkFailure);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(exec.plan().cursor(), 0);
    }

    #[tokio::test]
    async fn install_fetches_and_extracts_in_order() {
        let fx = fixture();
        let downloads = fx.platform.downloads.clone();
        let browser = fx.browser.clone();
        let chrome = fx.profile.join("chrome");
        let mut seq = mockall::Sequence::new();
        let mut archives = MockArchivePort::new();

        archives
            .expect_fetch()
            .withf(|url, dest| url.ends_with("/v0.1.1/program.zip") && dest.ends_with("program.zip"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        let program = downloads.join("program.zip");
        archives
            .expect_extract()
            .withf(move |archive, dest| archive == program && dest == browser)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        for name in ["profile", "engine", "locales"] {
            archives
                .expect_fetch()
                .withf(move |url, _| url.ends_with(&format!("/{name}.zip")))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
        }
        for name in ["profile", "engine", "locales"] {
            let archive = downloads.join(format!("{name}.zip"));
            let chrome = chrome.clone();
            archives
                .expect_extract()
                .withf(move |a, d| a == archive && d == chrome)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
        }

        let mut exec = executor(&fx, InstallFlags::default(), archives);
        let mut steps = 0;
        while !matches!(exec.advance().await, AdvanceOutcome::Completed) {
            steps += 1;
            assert!(steps <= exec.plan().len(), "plan did not terminate");
        }
        assert_eq!(steps, exec.plan().len() - 1);

        let prefs = fs::read_to_string(fx.profile.join("prefs.js")).unwrap();
        assert!(prefs.contains(r#"user_pref("sine.version", "2.3c");"#));
    }

    #[tokio::test]
    async fn unwritable_profile_hands_off_to_privileged_instance() {
        let fx = fixture();
        fx.platform.deny_writes(&fx.profile);
        let mut exec = executor(&fx, uninstall(), MockArchivePort::new());

        assert!(matches!(exec.advance().await, AdvanceOutcome::HandedOff));
        assert_eq!(exec.elevation_state(), ElevationState::Elevated);

        let relaunches = fx.platform.relaunches.lock().unwrap();
        assert_eq!(relaunches.len(), 1);
        assert_eq!(relaunches[0].profile_path, fx.profile);
        assert!(relaunches[0].flags.uninstall);
        assert!(!fx.profile.join("chrome").exists());
    }

    #[tokio::test]
    async fn missing_profile_fails_without_relaunch_or_creation() {
        let fx = fixture();
        let typo = fx.profile.with_file_name("tyop.default");
        let context = ResolvedInstallContext::new(&fx.browser, &typo);
        let mut exec = PlanExecutor::new(
            context,
            uninstall(),
            &LegacyInstall::Absent,
            InstallerConfig::default(),
            fx.platform.clone(),
            Arc::new(MockArchivePort::new()),
        );

        for _ in 0..2 {
            match exec.advance().await {
                AdvanceOutcome::Failed { index: 0, error, .. } => {
                    assert_eq!(error.kind(), ErrorKind::PathNotFound);
                    assert!(error.to_string().contains("tyop.default"));
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(fx.platform.relaunches.lock().unwrap().is_empty());
        assert!(!typo.exists());

        fs::create_dir_all(&typo).unwrap();
        assert!(matches!(exec.advance().await, AdvanceOutcome::Ran { index: 0, .. }));
    }

    #[tokio::test]
    async fn failed_relaunch_waits_for_explicit_retry() {
        let fx = fixture();
        fx.platform.deny_writes(&fx.browser);
        *fx.platform.relaunch_succeeds.lock().unwrap() = false;
        let mut exec = executor(&fx, uninstall(), MockArchivePort::new());

        for _ in 0..3 {
            assert!(matches!(
                exec.advance().await,
                AdvanceOutcome::Blocked(BlockReason::ElevationFailed)
            ));
        }
        assert_eq!(fx.platform.relaunches.lock().unwrap().len(), 1);

        *fx.platform.relaunch_succeeds.lock().unwrap() = true;
        assert!(exec.retry_elevation());
        assert!(matches!(exec.advance().await, AdvanceOutcome::HandedOff));
        assert_eq!(fx.platform.relaunches.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn browser_dir_only_matters_when_written() {
        let fx = fixture();
        fx.platform.deny_writes(&fx.browser);
        let flags = InstallFlags {
            reinstall_boot: false,
            ..InstallFlags::default()
        };
        let mut archives = MockArchivePort::new();
        archives.expect_fetch().returning(|_, _| Ok(()));
        let mut exec = executor(&fx, flags, archives);

        assert!(matches!(exec.advance().await, AdvanceOutcome::Ran { .. }));
        assert_eq!(exec.elevation_state(), ElevationState::NotNeeded);
        assert!(Path::new(&fx.profile).join("chrome").is_dir());
    }
}
