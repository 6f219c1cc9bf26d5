//! Command-line surface.
//!
//! The same schema parses interactive launches and the argument vector a
//! parent hands to its privileged child, so anything
//! [`ElevationRequest::to_args`] emits must parse here.

use std::path::PathBuf;

use clap::Parser;
use sine_core::{ElevationRequest, InstallFlags};

/// Install the Sine mod loader into a Firefox-based browser.
#[derive(Debug, Parser)]
#[command(name = "sine-installer")]
#[command(about = "Install or remove the Sine mod loader for Firefox-based browsers")]
#[command(version)]
pub struct Cli {
    /// Browser install directory; together with --profile, skips the wizard
    #[arg(long = "browser", value_name = "PATH")]
    pub browser: Option<PathBuf>,

    /// Profile directory to install into
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Keep installed mods when reinstalling
    #[arg(short = 's', long = "save")]
    pub save: bool,

    /// Remove Sine instead of installing it
    #[arg(short = 'u', long = "uninstall")]
    pub uninstall: bool,

    /// Leave the bootloader in the browser directory untouched
    #[arg(long = "no-boot")]
    pub no_boot: bool,

    /// Exit as soon as the run finishes
    #[arg(long = "update")]
    pub update: bool,

    /// Accepted from older elevated launches; no effect
    #[arg(long = "helper", hide = true)]
    pub helper: bool,

    /// Enable info-level logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub const fn flags(&self) -> InstallFlags {
        InstallFlags {
            save_data: self.save,
            uninstall: self.uninstall,
            reinstall_boot: !self.no_boot,
            show_exit_screen: !self.update,
        }
    }

    /// Both paths given: resume headless with these decisions.
    pub fn elevation_request(&self) -> Option<ElevationRequest> {
        match (&self.browser, &self.profile) {
            (Some(browser), Some(profile)) => Some(ElevationRequest::new(
                browser.clone(),
                profile.clone(),
                self.flags(),
            )),
            _ => None,
        }
    }
}
