//! Progress bar for plan execution.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Bar sized to the plan, drawn on stdout so stderr logging never tears it.
pub fn plan_bar(steps: usize) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(steps as u64), ProgressDrawTarget::stdout());
    bar.set_style(
        ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    bar
}

/// Show `label` for the step at `index` (0-based).
pub fn show_step(bar: &ProgressBar, index: usize, label: &'static str) {
    bar.set_position(index as u64);
    bar.set_message(label);
}
