//! Terminal installer for the Sine mod loader.
//!
//! Parses the command line, wires the runtime adapters into the core
//! wizard and drives it from a line-based terminal front end.
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod error;
pub mod parser;
pub mod presentation;

use console::{Term, style};

pub use bootstrap::{CliContext, Launch, bootstrap};
pub use error::CliError;
pub use parser::Cli;
pub use presentation::SessionEnd;

/// Run one installer session.
pub async fn run(cli: &Cli) -> anyhow::Result<SessionEnd> {
    let context = bootstrap()?;
    let term = Term::stdout();

    if cli.elevation_request().is_none() {
        if !term.is_term() {
            return Err(CliError::Arguments(
                "the wizard needs a terminal; pass --browser and --profile to run unattended"
                    .to_string(),
            )
            .into());
        }
        term.write_line(&style("Sine installer").bold().cyan().to_string())?;
        term.write_line(&format!(
            "Archives are staged in {}",
            bootstrap::staging_dir(&context).display()
        ))?;
    }

    let end = match context.launch(cli) {
        Launch::Headless(mut wizard) => {
            presentation::run_session(&mut wizard, &term, presentation::PathPresets::default())
                .await?
        }
        Launch::Interactive(mut wizard, presets) => {
            presentation::run_session(&mut wizard, &term, presets).await?
        }
    };
    tracing::info!(?end, "Session ended");
    Ok(end)
}
