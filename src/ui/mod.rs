//! Operator-facing output and prompts.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use kitup::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("kitup");
//! ui.success("Workstation ready");
//! ```

pub mod icons;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

use std::time::Duration;

pub use icons::StatusKind;
pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::format_duration;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, KitupTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show progress (e.g., "Step 3 of 7").
    fn show_progress(&mut self, current: usize, total: usize);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;

    /// Show a dimmed follow-up hint.
    fn show_hint(&mut self, hint: &str) {
        self.message(hint);
    }

    /// Show the per-step summary table at the end of a run.
    fn show_run_summary(&mut self, summary: &RunSummary) {
        for step in &summary.steps {
            let line = match &step.detail {
                Some(detail) => format!("{} {} ({})", step.status.icon(), step.name, detail),
                None => format!("{} {}", step.status.icon(), step.name),
            };
            self.message(&line);
        }
    }

    /// Ask a yes/no question.
    fn confirm(&mut self, key: &str, question: &str, default: bool) -> Result<bool> {
        let prompt = Prompt {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Confirm,
            default: Some(default.to_string()),
        };
        let result = self.prompt(&prompt)?;
        Ok(result.as_bool().unwrap_or_else(|| parse_yes(&result.as_string())))
    }

    /// Ask for free text, offering `default` when the operator just presses Enter.
    fn input(&mut self, key: &str, question: &str, default: Option<&str>) -> Result<String> {
        let prompt = Prompt {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Input,
            default: default.map(String::from),
        };
        Ok(self.prompt(&prompt)?.as_string())
    }
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for `KITUP_PROMPT_<KEY>` overrides).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

/// The type of prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input.
    String(String),
}

impl PromptResult {
    /// Get as string.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Get as bool if this is a Bool result.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Interpret a textual answer as yes/no.
pub fn parse_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// One row of the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSummary {
    /// Step display name.
    pub name: String,
    /// Final status.
    pub status: StatusKind,
    /// Short explanation ("already installed", "2 of 5 packages failed").
    pub detail: Option<String>,
}

/// Data for the end-of-run summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows in execution order.
    pub steps: Vec<StepSummary>,
    /// Wall time of the whole run.
    pub total_duration: Duration,
    /// Number of counted failures.
    pub failures: usize,
    /// Whether fail-fast stopped the run early.
    pub aborted: bool,
}
