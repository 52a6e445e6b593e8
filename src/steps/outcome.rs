//! Per-step results.

use std::time::Duration;

use crate::ui::{StatusKind, StepSummary};

/// Final state of one install step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step changed the machine (installed, configured, appended).
    Completed,
    /// Everything the step manages was already in place.
    AlreadyPresent,
    /// The step chose not to act (operator declined).
    Skipped,
    /// The step failed; see [`StepOutcome::failures`].
    Failed,
    /// The step never ran because fail-fast stopped the run.
    NotRun,
}

impl StepStatus {
    /// Icon used in the summary table.
    pub fn status_kind(self) -> StatusKind {
        match self {
            Self::Completed | Self::AlreadyPresent => StatusKind::Success,
            Self::Skipped | Self::NotRun => StatusKind::Skipped,
            Self::Failed => StatusKind::Failed,
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::AlreadyPresent => "already present",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
            Self::NotRun => "not run",
        };
        write!(f, "{}", s)
    }
}

/// What a step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Step display name.
    pub name: String,
    /// Final status.
    pub status: StepStatus,
    /// Short human-readable explanation.
    pub detail: Option<String>,
    /// Number of counted failures (0 unless `status` is `Failed`).
    pub failures: usize,
    /// Wall time spent in the step.
    pub duration: Duration,
}

impl StepOutcome {
    fn new(name: &str, status: StepStatus, detail: Option<String>, failures: usize) -> Self {
        Self {
            name: name.to_string(),
            status,
            detail,
            failures,
            duration: Duration::ZERO,
        }
    }

    /// The step changed the machine.
    pub fn completed(name: &str, detail: impl Into<String>) -> Self {
        Self::new(name, StepStatus::Completed, Some(detail.into()), 0)
    }

    /// Nothing to do.
    pub fn present(name: &str, detail: impl Into<String>) -> Self {
        Self::new(name, StepStatus::AlreadyPresent, Some(detail.into()), 0)
    }

    /// The step deliberately did nothing.
    pub fn skipped(name: &str, reason: impl Into<String>) -> Self {
        Self::new(name, StepStatus::Skipped, Some(reason.into()), 0)
    }

    /// A single failure.
    pub fn failed(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, StepStatus::Failed, Some(message.into()), 1)
    }

    /// A batch where `failures` items failed.
    pub fn partial(name: &str, failures: usize, detail: impl Into<String>) -> Self {
        Self::new(name, StepStatus::Failed, Some(detail.into()), failures)
    }

    /// Placeholder for a step that fail-fast never reached.
    pub fn not_run(name: &str) -> Self {
        Self::new(name, StepStatus::NotRun, Some("not run".to_string()), 0)
    }

    /// Attach the measured duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the step counts as failed.
    pub fn is_failure(&self) -> bool {
        self.status == StepStatus::Failed
    }

    /// Row for the summary table.
    pub fn summary(&self) -> StepSummary {
        StepSummary {
            name: self.name.clone(),
            status: self.status.status_kind(),
            detail: self.detail.clone(),
        }
    }
}
