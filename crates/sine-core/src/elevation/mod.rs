//! Privilege escalation: deciding whether it is needed and tracking the
//! single relaunch attempt.
//!
//! A run that lacks write access hands off to a privileged copy of the
//! program. The unprivileged instance builds an [`ElevationRequest`], asks
//! the platform to relaunch, and exits once the relaunch succeeds. The
//! privileged instance is a fresh process that parses the same arguments and
//! starts directly in the execution phase.

mod request;

use std::path::Path;

pub use request::ElevationRequest;

use crate::plan::InstallFlags;
use crate::ports::{PlatformPort, PlatformResult};

/// Where a run stands with respect to privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElevationState {
    /// Write access has not been checked yet.
    #[default]
    Unknown,
    /// Every target is writable.
    NotNeeded,
    /// A target is not writable but this process is already privileged.
    AlreadyElevated,
    /// A target is not writable; a relaunch is required.
    NeedsElevation,
    /// A privileged instance took over; this one must exit.
    Elevated,
    /// The relaunch was declined or failed.
    ElevationFailed,
}

/// Whether a run with these targets needs rights the user lacks.
///
/// The browser directory only matters when the plan writes to it.
pub fn needs_admin(
    platform: &dyn PlatformPort,
    browser_path: &Path,
    profile_path: &Path,
    flags: &InstallFlags,
) -> bool {
    let browser_blocked =
        (flags.reinstall_boot || flags.uninstall) && !platform.is_writable(browser_path);
    browser_blocked || !platform.is_writable(profile_path)
}

/// Tracks the elevation state of one run.
///
/// Writability is checked once and cached. A relaunch is attempted at most
/// once per arming: the gate starts armed, and each [`retry`](Self::retry)
/// after a failure re-arms it for exactly one more attempt.
#[derive(Debug, Clone)]
pub struct ElevationGate {
    state: ElevationState,
    armed: bool,
}

impl Default for ElevationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ElevationGate {
    pub const fn new() -> Self {
        Self {
            state: ElevationState::Unknown,
            armed: true,
        }
    }

    pub const fn state(&self) -> ElevationState {
        self.state
    }

    /// Resolve `Unknown` on first call; later calls return the cached state.
    pub fn evaluate(
        &mut self,
        needs_admin: impl FnOnce() -> bool,
        is_admin: impl FnOnce() -> bool,
    ) -> ElevationState {
        if self.state == ElevationState::Unknown {
            self.state = if !needs_admin() {
                ElevationState::NotNeeded
            } else if is_admin() {
                ElevationState::AlreadyElevated
            } else {
                ElevationState::NeedsElevation
            };
            tracing::debug!(state = ?self.state, "Evaluated privileges");
        }
        self.state
    }

    pub const fn has_permissions(&self) -> bool {
        matches!(
            self.state,
            ElevationState::NotNeeded | ElevationState::AlreadyElevated
        )
    }

    /// Whether the next [`attempt`](Self::attempt) will actually relaunch.
    pub const fn can_attempt(&self) -> bool {
        self.armed && matches!(self.state, ElevationState::NeedsElevation)
    }

    /// Run `relaunch` if an attempt is pending, recording the outcome.
    pub fn attempt(&mut self, relaunch: impl FnOnce() -> PlatformResult<()>) -> ElevationState {
        if !self.can_attempt() {
            return self.state;
        }
        self.armed = false;
        self.state = match relaunch() {
            Ok(()) => {
                tracing::info!("Privileged instance launched; handing off");
                ElevationState::Elevated
            }
            Err(e) => {
                tracing::warn!(error = %e, "Privileged relaunch failed");
                ElevationState::ElevationFailed
            }
        };
        self.state
    }

    /// Re-arm one attempt after a failure. Returns `false` if there was no
    /// failure to retry.
    pub fn retry(&mut self) -> bool {
        if self.state == ElevationState::ElevationFailed {
            self.state = ElevationState::NeedsElevation;
            self.armed = true;
            true
        } else {
            false
        }
    }
}
