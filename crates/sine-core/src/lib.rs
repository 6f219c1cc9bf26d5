//! Core domain of the Sine installer.
//!
//! Browser catalog, path resolution, install planning, plan execution and
//! the elevation protocol. OS-specific work is reached only through the
//! ports in [`ports`]; adapters live in `sine-runtime`.
#![deny(unused_crate_dependencies)]

pub mod catalog;
pub mod config;
pub mod elevation;
pub mod error;
pub mod executor;
pub mod paths;
pub mod plan;
pub mod ports;
pub mod profile;
pub mod wizard;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use catalog::{BrowserDefinition, OsKind, find_browser, list_browsers, list_channels};
pub use config::{ConfigError, InstallerConfig};
pub use elevation::{ElevationGate, ElevationRequest, ElevationState};
pub use error::{ErrorKind, InstallError, InstallResult};
pub use executor::{AdvanceOutcome, BlockReason, PlanExecutor};
pub use paths::{PathError, ResolvedInstallContext, SpecialDirs};
pub use plan::{ArchiveKind, InstallFlags, InstallPlan, StepKind, build_plan};
pub use ports::{ArchivePort, PlatformError, PlatformPort, PlatformResult};
pub use profile::{LegacyInstall, detect_legacy_install, list_profiles};
pub use wizard::{Wizard, WizardPhase};
