//! Terminal front end for the installer wizard.
//!
//! Each loop iteration is one frame: read the wizard's state, draw it,
//! feed back the user's answer. During execution the frame calls
//! `PlanExecutor::advance` exactly once.
//!
//! # Guidelines
//!
//! - No install logic here; decisions live in `sine_core::Wizard`
//! - Blocking prompts are fine, a frame waits for the user anyway

mod progress;
mod prompt;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use console::{Term, style};
use indicatif::ProgressBar;
use sine_core::{AdvanceOutcome, BlockReason, LegacyInstall, Wizard, WizardPhase};

use crate::error::CliError;
pub use prompt::{Choice, parse_choice};

/// Delay between polls while the browser is still open.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Paths given on the command line without the other half.
#[derive(Debug, Clone, Default)]
pub struct PathPresets {
    pub browser: Option<PathBuf>,
    /// A profile directory; its parent becomes the profile root.
    pub profile: Option<PathBuf>,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Finished,
    /// A privileged instance took over.
    HandedOff,
    /// The user backed out before anything was changed.
    Cancelled,
}

/// Drive `wizard` until it finishes or hands off.
pub async fn run_session(
    wizard: &mut Wizard,
    term: &Term,
    mut presets: PathPresets,
) -> Result<SessionEnd> {
    loop {
        match wizard.phase() {
            WizardPhase::SelectBrowser => {
                let browsers = wizard.browsers();
                let current = browsers.iter().position(|b| *b == wizard.browser().name);
                let quit = [('q', "Quit")];
                match prompt::select(term, "Select your browser", &browsers, current, &quit)? {
                    Choice::Pick(i) => {
                        wizard.select_browser(i);
                        wizard.advance()?;
                    }
                    Choice::Key(_) | Choice::Back => return Ok(SessionEnd::Cancelled),
                }
            }
            WizardPhase::SelectChannel => {
                let channels = wizard.channels();
                let current = channels.iter().position(|c| *c == wizard.channel());
                match prompt::select(term, "Select a channel", &channels, current, &[])? {
                    Choice::Pick(i) => {
                        wizard.select_channel(i);
                        wizard.advance()?;
                    }
                    Choice::Back | Choice::Key(_) => {
                        wizard.retreat();
                    }
                }
            }
            WizardPhase::ConfirmPaths => {
                apply_presets(wizard, &mut presets);
                confirm_paths(wizard, term)?;
            }
            WizardPhase::SelectProfile => select_profile(wizard, term)?,
            WizardPhase::LegacyOptions => legacy_options(wizard, term)?,
            WizardPhase::Execute => {
                if let Some(end) = execute(wizard, term).await? {
                    return Ok(end);
                }
            }
            WizardPhase::Finished => {
                let done = style("Sine is ready. Restart your browser to finish.").green();
                term.write_line(&done.to_string())?;
                return Ok(SessionEnd::Finished);
            }
        }
    }
}

fn apply_presets(wizard: &mut Wizard, presets: &mut PathPresets) {
    if let Some(browser) = presets.browser.take() {
        wizard.set_browser_path(browser);
    }
    if let Some(root) = presets.profile.take().and_then(|p| p.parent().map(PathBuf::from)) {
        wizard.set_profile_root(root);
    }
}

fn confirm_paths(wizard: &mut Wizard, term: &Term) -> Result<()> {
    term.write_line(&style("Confirm locations").bold().to_string())?;
    term.write_line(&format!("  Browser:  {}", wizard.browser_path().display()))?;
    if let Some(err) = wizard.browser_path_error() {
        term.write_line(&format!("            {}", style(err).red()))?;
    }
    term.write_line(&format!("  Profiles: {}", wizard.profile_root().display()))?;
    if let Some(err) = wizard.profile_root_error() {
        term.write_line(&format!("            {}", style(err).red()))?;
    }

    let options = ["Continue", "Change browser folder", "Change profiles folder"];
    match prompt::select(term, "What next?", &options, Some(0), &[])? {
        Choice::Pick(0) => {
            if let Err(err) = wizard.advance() {
                term.write_line(&style(err).red().to_string())?;
            }
        }
        Choice::Pick(1) => {
            let path = prompt::read_path(term, "Browser folder", wizard.browser_path())?;
            wizard.set_browser_path(path);
        }
        Choice::Pick(_) => {
            let path = prompt::read_path(term, "Profiles folder", wizard.profile_root())?;
            wizard.set_profile_root(path);
        }
        Choice::Back | Choice::Key(_) => {
            wizard.retreat();
        }
    }
    Ok(())
}

fn select_profile(wizard: &mut Wizard, term: &Term) -> Result<()> {
    let profiles: Vec<String> = wizard.profiles().to_vec();
    let names: Vec<&str> = profiles.iter().map(String::as_str).collect();
    let current = wizard
        .selected_profile()
        .and_then(|sel| names.iter().position(|n| *n == sel));
    let toggle = if wizard.shows_unused_profiles() {
        "Hide profiles the browser never opened"
    } else {
        "Show all profiles"
    };

    if names.is_empty() {
        term.write_line(&style("No profiles found in this folder.").yellow().to_string())?;
    }
    match prompt::select(term, "Select a profile", &names, current, &[('a', toggle)])? {
        Choice::Pick(i) => {
            wizard.select_profile(i);
            if let Err(err) = wizard.advance() {
                term.write_line(&style(err).red().to_string())?;
            }
        }
        Choice::Key(_) => {
            let show = !wizard.shows_unused_profiles();
            wizard.set_show_unused_profiles(show);
        }
        Choice::Back => {
            wizard.retreat();
        }
    }
    Ok(())
}

fn legacy_options(wizard: &mut Wizard, term: &Term) -> Result<()> {
    let legacy: LegacyInstall = wizard.legacy().clone();
    let found = match legacy.version() {
        Some(version) => format!("Sine {version} is already installed in this profile."),
        None => "Sine is already installed in this profile.".to_string(),
    };
    term.write_line(&style(found).bold().to_string())?;

    let current = usize::from(wizard.flags().uninstall);
    let actions = ["Update / reinstall", "Uninstall"];
    match prompt::select(term, "What would you like to do?", &actions, Some(current), &[])? {
        Choice::Pick(i) => {
            let uninstall = i == 1;
            wizard.set_uninstall(uninstall);
            if !uninstall {
                let current = wizard.flags().reinstall_boot;
                let boot = prompt::confirm(term, "Reinstall the bootloader?", current)?;
                wizard.set_reinstall_boot(boot);
            }
            if legacy.has_mods() {
                let current = wizard.flags().save_data;
                let save = prompt::confirm(term, "Keep your installed mods?", current)?;
                wizard.set_save_data(save);
            }
            wizard.advance()?;
        }
        Choice::Back | Choice::Key(_) => {
            wizard.retreat();
        }
    }
    Ok(())
}

/// Run the plan to completion. `Some` ends the session.
async fn execute(wizard: &mut Wizard, term: &Term) -> Result<Option<SessionEnd>> {
    let Some(executor) = wizard.executor_mut() else {
        bail!("execution started without a plan");
    };
    let show_exit_screen = executor.flags().show_exit_screen;
    let bar = progress::plan_bar(executor.plan().len());
    let mut waiting = false;

    loop {
        let (_, label) = executor.progress();
        progress::show_step(&bar, executor.plan().cursor(), label);

        match executor.advance().await {
            AdvanceOutcome::Ran { .. } => waiting = false,
            AdvanceOutcome::Completed => {
                bar.set_position(executor.plan().len() as u64);
                bar.finish_with_message("Finished.");
                break;
            }
            AdvanceOutcome::Blocked(reason @ BlockReason::BrowserRunning { .. }) => {
                if !waiting {
                    bar.println(style(&reason).yellow().to_string());
                    waiting = true;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            AdvanceOutcome::Blocked(reason @ BlockReason::ElevationFailed) => {
                let retry = term.is_term()
                    && bar.suspend(|| -> Result<bool> {
                        term.write_line(&style(&reason).red().to_string())?;
                        prompt::confirm(term, "Retry?", true)
                    })?;
                if !retry {
                    bar.abandon();
                    return Err(CliError::from(reason.to_error()).into());
                }
                executor.retry_elevation();
            }
            AdvanceOutcome::HandedOff => {
                bar.finish_and_clear();
                tracing::info!("Privileged installer took over");
                return Ok(Some(SessionEnd::HandedOff));
            }
            AdvanceOutcome::Failed { step, error, .. } => {
                let retry = term.is_term()
                    && bar.suspend(|| -> Result<bool> {
                        let heading = style(format!("{step} failed:")).red();
                        term.write_line(&format!("{heading} {error}"))?;
                        prompt::confirm(term, "Retry this step?", true)
                    })?;
                if !retry {
                    bar.abandon();
                    return Err(CliError::from(error).into());
                }
            }
        }
    }

    wizard.advance()?;
    if show_exit_screen {
        Ok(None)
    } else {
        Ok(Some(SessionEnd::Finished))
    }
}
