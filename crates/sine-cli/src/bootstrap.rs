//! CLI bootstrap - the composition root.
//!
//! The only place where concrete adapters are chosen and wired into the
//! core: the native platform adapter and the HTTP/zip archive pipeline
//! from sine-runtime.

use std::path::PathBuf;
use std::sync::Arc;

use sine_core::{ArchivePort, InstallerConfig, PlatformPort, Wizard};
use sine_runtime::{ArchivePipeline, native_platform};

use crate::error::CliError;
use crate::parser::Cli;
use crate::presentation::PathPresets;

/// Fully composed dependencies for one run.
pub struct CliContext {
    pub platform: Arc<dyn PlatformPort>,
    pub archives: Arc<dyn ArchivePort>,
    pub config: InstallerConfig,
}

/// Read configuration from the environment and build the native adapters.
pub fn bootstrap() -> Result<CliContext, CliError> {
    let config = InstallerConfig::from_env()?;
    let platform = native_platform();
    let archives: Arc<dyn ArchivePort> = Arc::new(ArchivePipeline::new(Arc::clone(&platform)));

    tracing::debug!(
        os = %platform.os(),
        boot_version = %config.boot_version,
        engine_version = %config.engine_version,
        "Bootstrapped installer"
    );
    Ok(CliContext {
        platform,
        archives,
        config,
    })
}

/// How this invocation starts.
pub enum Launch {
    /// Both paths were given: go straight to execution.
    Headless(Wizard),
    /// Walk the user through the wizard, prefilling any single path given.
    Interactive(Wizard, PathPresets),
}

impl CliContext {
    pub fn launch(self, cli: &Cli) -> Launch {
        if let Some(request) = cli.elevation_request() {
            let wizard = Wizard::headless(
                self.platform,
                self.archives,
                self.config,
                request.browser_path,
                &request.profile_path,
                request.flags,
            );
            return Launch::Headless(wizard);
        }

        let presets = PathPresets {
            browser: cli.browser.clone(),
            profile: cli.profile.clone(),
        };
        let wizard = Wizard::new(self.platform, self.archives, self.config, cli.flags());
        Launch::Interactive(wizard, presets)
    }
}

/// Where archives will be staged, for the startup banner.
pub fn staging_dir(context: &CliContext) -> PathBuf {
    context
        .config
        .downloads_dir
        .clone()
        .unwrap_or_else(|| context.platform.downloads_dir())
}
