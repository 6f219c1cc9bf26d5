//! The installer wizard: selection phases leading up to plan execution.
//!
//! [`Wizard`] is the single owner of the run's state. The presentation
//! layer reads from it every frame, feeds user input through its setters,
//! and moves between phases only with [`Wizard::advance`] and
//! [`Wizard::retreat`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{BROWSERS, BrowserDefinition, identify_browser, list_browsers};
use crate::config::InstallerConfig;
use crate::executor::PlanExecutor;
use crate::paths::{
    PathError, ResolvedInstallContext, resolve_install_path, resolve_profile_root,
    validate_browser_dir, validate_profile_root,
};
use crate::plan::InstallFlags;
use crate::ports::{ArchivePort, PlatformPort};
use crate::profile::{LegacyInstall, detect_legacy_install, list_profiles};

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardPhase {
    SelectBrowser,
    /// Skipped for browsers with a single channel.
    SelectChannel,
    /// Review or edit the install and profile-root paths.
    ConfirmPaths,
    SelectProfile,
    /// Only shown when the profile carries a previous install.
    LegacyOptions,
    Execute,
    Finished,
}

pub struct Wizard {
    phase: WizardPhase,
    platform: Arc<dyn PlatformPort>,
    archives: Arc<dyn ArchivePort>,
    config: InstallerConfig,
    browser: &'static BrowserDefinition,
    channel: &'static str,
    browser_path: PathBuf,
    profile_root: PathBuf,
    profiles: Vec<String>,
    profile: Option<usize>,
    show_unused_profiles: bool,
    flags: InstallFlags,
    legacy: LegacyInstall,
    executor: Option<PlanExecutor>,
}

impl Wizard {
    /// Start an interactive session at browser selection.
    pub fn new(
        platform: Arc<dyn PlatformPort>,
        archives: Arc<dyn ArchivePort>,
        config: InstallerConfig,
        flags: InstallFlags,
    ) -> Self {
        let browser = &BROWSERS[0];
        Self {
            phase: WizardPhase::SelectBrowser,
            platform,
            archives,
            config,
            browser,
            channel: browser.channels[0].name,
            browser_path: PathBuf::new(),
            profile_root: PathBuf::new(),
            profiles: Vec::new(),
            profile: None,
            show_unused_profiles: false,
            flags,
            legacy: LegacyInstall::Absent,
            executor: None,
        }
    }

    /// Resume a run whose paths were decided elsewhere (command line or a
    /// parent process handing off for elevation). Starts in Execute.
    pub fn headless(
        platform: Arc<dyn PlatformPort>,
        archives: Arc<dyn ArchivePort>,
        config: InstallerConfig,
        browser_path: PathBuf,
        profile_path: &Path,
        flags: InstallFlags,
    ) -> Self {
        let os = platform.os();
        let home = platform.special_dirs().home;
        let identified = identify_browser(&browser_path, os, home.as_deref());
        let mut wizard = Self::new(platform, archives, config, flags);
        if let Some(browser) = identified {
            wizard.browser = browser;
            wizard.channel = browser.channels[0].name;
        }
        wizard.browser_path = browser_path;
        wizard.profile_root = profile_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let name = profile_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        wizard.profiles = vec![name];
        wizard.profile = Some(0);
        tracing::info!(
            browser = identified.map_or("unknown", |b| b.name),
            profile = %profile_path.display(),
            "Resuming headless run"
        );
        // The channel cannot be told from a path.
        wizard.enter_execute(identified, None, profile_path.to_path_buf());
        wizard
    }

    pub const fn phase(&self) -> WizardPhase {
        self.phase
    }

    // === Browser and channel ===

    pub fn browsers(&self) -> Vec<&'static str> {
        list_browsers()
    }

    pub const fn browser(&self) -> &'static BrowserDefinition {
        self.browser
    }

    pub fn select_browser(&mut self, index: usize) -> bool {
        let Some(browser) = BROWSERS.get(index) else {
            return false;
        };
        if browser != self.browser {
            self.browser = browser;
            self.channel = browser.channels[0].name;
        }
        true
    }

    pub fn channels(&self) -> Vec<&'static str> {
        self.browser.channel_names()
    }

    pub const fn channel(&self) -> &'static str {
        self.channel
    }

    pub fn select_channel(&mut self, index: usize) -> bool {
        match self.browser.channels.get(index) {
            Some(channel) => {
                self.channel = channel.name;
                true
            }
            None => false,
        }
    }

    // === Paths ===

    pub fn browser_path(&self) -> &Path {
        &self.browser_path
    }

    pub fn profile_root(&self) -> &Path {
        &self.profile_root
    }

    /// Override the install path. The catalog is left untouched.
    pub fn set_browser_path(&mut self, path: impl Into<PathBuf>) {
        self.browser_path = path.into();
    }

    pub fn set_profile_root(&mut self, path: impl Into<PathBuf>) {
        self.profile_root = path.into();
    }

    pub fn browser_path_error(&self) -> Option<PathError> {
        validate_browser_dir(&self.browser_path, self.platform.os()).err()
    }

    pub fn profile_root_error(&self) -> Option<PathError> {
        validate_profile_root(&self.profile_root).err()
    }

    // === Profiles ===

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn selected_profile(&self) -> Option<&str> {
        self.profile
            .and_then(|i| self.profiles.get(i))
            .map(String::as_str)
    }

    pub fn select_profile(&mut self, index: usize) -> bool {
        if index < self.profiles.len() {
            self.profile = Some(index);
            true
        } else {
            false
        }
    }

    pub const fn shows_unused_profiles(&self) -> bool {
        self.show_unused_profiles
    }

    /// Include profiles the browser never opened, then re-list.
    pub fn set_show_unused_profiles(&mut self, show: bool) {
        self.show_unused_profiles = show;
        self.refresh_profiles();
    }

    fn refresh_profiles(&mut self) {
        let previous = self.selected_profile().map(str::to_owned);
        self.profiles = list_profiles(&self.profile_root, self.show_unused_profiles);
        self.profile = previous
            .and_then(|name| self.profiles.iter().position(|p| *p == name))
            .or_else(|| (!self.profiles.is_empty()).then_some(0));
    }

    // === Options ===

    pub const fn legacy(&self) -> &LegacyInstall {
        &self.legacy
    }

    pub const fn flags(&self) -> &InstallFlags {
        &self.flags
    }

    /// Only meaningful when the previous install has mods to keep.
    pub fn set_save_data(&mut self, save: bool) {
        self.flags.save_data = save && self.legacy.has_mods();
    }

    pub const fn set_uninstall(&mut self, uninstall: bool) {
        self.flags.uninstall = uninstall;
    }

    pub const fn set_reinstall_boot(&mut self, reinstall: bool) {
        self.flags.reinstall_boot = reinstall;
    }

    // === Execution ===

    pub const fn executor(&self) -> Option<&PlanExecutor> {
        self.executor.as_ref()
    }

    pub const fn executor_mut(&mut self) -> Option<&mut PlanExecutor> {
        self.executor.as_mut()
    }

    // === Transitions ===

    /// Move to the next phase.
    ///
    /// Fails without changing phase when the current input is invalid.
    pub fn advance(&mut self) -> Result<WizardPhase, PathError> {
        let next = match self.phase {
            WizardPhase::SelectBrowser if self.browser.channels.len() > 1 => {
                WizardPhase::SelectChannel
            }
            WizardPhase::SelectBrowser | WizardPhase::SelectChannel => {
                self.resolve_paths();
                WizardPhase::ConfirmPaths
            }
            WizardPhase::ConfirmPaths => {
                if let Some(err) = self.browser_path_error().or_else(|| self.profile_root_error()) {
                    return Err(err);
                }
                self.refresh_profiles();
                WizardPhase::SelectProfile
            }
            WizardPhase::SelectProfile => {
                let Some(name) = self.selected_profile() else {
                    return Err(PathError::NoProfiles(self.profile_root.clone()));
                };
                let profile_path = self.profile_root.join(name);
                self.legacy = detect_legacy_install(&profile_path);
                if self.legacy.is_present() {
                    WizardPhase::LegacyOptions
                } else {
                    self.enter_execute(Some(self.browser), Some(self.channel), profile_path);
                    WizardPhase::Execute
                }
            }
            WizardPhase::LegacyOptions => {
                let profile_path = self.profile_path().unwrap_or_default();
                self.enter_execute(Some(self.browser), Some(self.channel), profile_path);
                WizardPhase::Execute
            }
            WizardPhase::Execute if self.executor.as_ref().is_some_and(PlanExecutor::is_complete) => {
                WizardPhase::Finished
            }
            WizardPhase::Execute => WizardPhase::Execute,
            WizardPhase::Finished => WizardPhase::Finished,
        };
        self.set_phase(next);
        Ok(next)
    }

    /// Move to the previous phase. Execution cannot be backed out of.
    pub fn retreat(&mut self) -> WizardPhase {
        let previous = match self.phase {
            WizardPhase::SelectBrowser | WizardPhase::SelectChannel => WizardPhase::SelectBrowser,
            WizardPhase::ConfirmPaths if self.browser.channels.len() > 1 => {
                WizardPhase::SelectChannel
            }
            WizardPhase::ConfirmPaths => WizardPhase::SelectBrowser,
            WizardPhase::SelectProfile => WizardPhase::ConfirmPaths,
            WizardPhase::LegacyOptions => WizardPhase::SelectProfile,
            WizardPhase::Execute => WizardPhase::Execute,
            WizardPhase::Finished => WizardPhase::Finished,
        };
        self.set_phase(previous);
        previous
    }

    fn set_phase(&mut self, phase: WizardPhase) {
        if phase != self.phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "Wizard phase change");
            self.phase = phase;
        }
    }

    fn profile_path(&self) -> Option<PathBuf> {
        self.selected_profile()
            .map(|name| self.profile_root.join(name))
    }

    fn resolve_paths(&mut self) {
        let os = self.platform.os();
        let dirs = self.platform.special_dirs();
        self.browser_path =
            resolve_install_path(self.browser, self.channel, os, &dirs).unwrap_or_default();
        self.profile_root = resolve_profile_root(self.browser, os, &dirs).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not resolve profile root");
            PathBuf::new()
        });
    }

    fn enter_execute(
        &mut self,
        browser: Option<&'static BrowserDefinition>,
        channel: Option<&'static str>,
        profile_path: PathBuf,
    ) {
        if matches!(self.legacy, LegacyInstall::Absent) {
            self.legacy = detect_legacy_install(&profile_path);
        }
        let mut context = ResolvedInstallContext::new(self.browser_path.clone(), profile_path);
        if let Some(browser) = browser {
            context = context.with_browser(browser, channel.map(str::to_string));
        }
        self.executor = Some(PlanExecutor::new(
            context,
            self.flags,
            &self.legacy,
            self.config.clone(),
            Arc::clone(&self.platform),
            Arc::clone(&self.archives),
        ));
        self.phase = WizardPhase::Execute;
    }
}
