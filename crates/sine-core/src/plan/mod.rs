//! Install plans: the ordered steps of a run and the cursor through them.

mod builder;
mod flags;
mod step;

pub use builder::{build_plan, effective_flags};
pub use flags::InstallFlags;
pub use step::{ArchiveKind, StepKind};

/// Ordered steps plus the index of the next one to run.
///
/// The cursor never moves past the last step, which is always
/// [`StepKind::Finished`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    steps: Vec<StepKind>,
    cursor: usize,
}

impl InstallPlan {
    fn new(steps: Vec<StepKind>) -> Self {
        debug_assert!(steps.last().is_some_and(|s| s.is_terminal()));
        Self { steps, cursor: 0 }
    }

    pub fn steps(&self) -> &[StepKind] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> StepKind {
        self.steps
            .get(self.cursor)
            .copied()
            .unwrap_or(StepKind::Finished)
    }

    /// Move to the next step. Returns `false` when already on the last one.
    pub fn advance_cursor(&mut self) -> bool {
        if self.cursor + 1 < self.steps.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Fraction shown on the progress bar: `(cursor + 1) / len`.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        if self.steps.is_empty() {
            return 1.0;
        }
        (self.cursor + 1) as f32 / self.steps.len() as f32
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.label()).collect()
    }
}
