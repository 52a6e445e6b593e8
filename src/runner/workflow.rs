//! Step orchestration.

use std::time::{Duration, Instant};

use crate::config::RunMode;
use crate::steps::{standard_steps, InstallStep, StepContext, StepOutcome};
use crate::ui::{RunSummary, UserInterface};

/// Runs install steps strictly in order.
pub struct WorkflowRunner {
    steps: Vec<Box<dyn InstallStep>>,
}

/// Result of running the install steps.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One outcome per step, in order, including steps never reached.
    pub outcomes: Vec<StepOutcome>,
    /// Total duration.
    pub duration: Duration,
    /// Failure policy that was in effect.
    pub mode: RunMode,
    /// Whether fail-fast stopped the run early.
    pub aborted: bool,
    /// Whether mutations were only described.
    pub dry_run: bool,
}

impl RunReport {
    /// Total counted failures across all steps.
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.failures).sum()
    }

    /// Whether the run finished with no failures.
    pub fn success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Names of steps that failed.
    pub fn failed_steps(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_failure())
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Data for the summary table.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.outcomes.iter().map(StepOutcome::summary).collect(),
            total_duration: self.duration,
            failures: self.failure_count(),
            aborted: self.aborted,
        }
    }
}

impl WorkflowRunner {
    /// Runner over an explicit step list.
    pub fn new(steps: Vec<Box<dyn InstallStep>>) -> Self {
        Self { steps }
    }

    /// Runner over the seven standard provisioning steps.
    pub fn standard() -> Self {
        Self::new(standard_steps())
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step, honoring the context's run mode.
    ///
    /// A step that returns `Err` is recorded as a single failure; nothing
    /// here aborts except fail-fast.
    pub fn run(&self, ctx: &StepContext<'_>, ui: &mut dyn UserInterface) -> RunReport {
        let start = Instant::now();

        if !ctx.dry_run {
            match ctx.startup.ensure_exists() {
                Ok(true) => tracing::debug!("Created {}", ctx.startup.path().display()),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Could not create {}: {}", ctx.startup.path().display(), e);
                    ui.warning(&format!(
                        "Could not create {}: {}",
                        ctx.startup.path().display(),
                        e
                    ));
                }
            }
        }

        let total = self.steps.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut aborted = false;

        for (index, step) in self.steps.iter().enumerate() {
            if aborted {
                outcomes.push(StepOutcome::not_run(step.name()));
                continue;
            }

            ui.show_progress(index + 1, total);
            ui.message(step.name());

            let step_start = Instant::now();
            let outcome = match step.run(ctx, ui) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!("Step '{}' failed: {}", step.name(), e);
                    ui.error(&format!("{}: {}", step.name(), e));
                    StepOutcome::failed(step.name(), e.to_string())
                }
            }
            .with_duration(step_start.elapsed());

            tracing::debug!(
                "Step '{}' finished: {} ({} failures)",
                outcome.name,
                outcome.status,
                outcome.failures
            );

            if outcome.is_failure() && ctx.mode.aborts_on_failure() {
                ui.error(&format!("Stopping after '{}' failed (fail-fast)", step.name()));
                aborted = true;
            }
            outcomes.push(outcome);
        }

        RunReport {
            outcomes,
            duration: start.elapsed(),
            mode: ctx.mode,
            aborted,
            dry_run: ctx.dry_run,
        }
    }
}
