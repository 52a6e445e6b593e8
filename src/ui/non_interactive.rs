//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{KitupError, Result};

use super::theme::KitupTheme;
use super::{
    format_duration, parse_yes, OutputMode, Prompt, PromptResult, PromptType, RunSummary,
    SpinnerHandle, UserInterface,
};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "KITUP_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `KITUP_PROMPT_<KEY>` variables, then from
/// the prompt's default. A prompt with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn answer(&self, prompt: &Prompt) -> Option<String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        self.env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref())
            .cloned()
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let Some(value) = self.answer(prompt) else {
            return Err(KitupError::PromptUnavailable {
                key: prompt.key.clone(),
                message: "no default value in non-interactive mode".to_string(),
            });
        };

        if self.mode.shows_status() {
            println!("{} {}", prompt.question, value);
        }

        match prompt.prompt_type {
            PromptType::Confirm => Ok(PromptResult::Bool(parse_yes(&value))),
            PromptType::Input => Ok(PromptResult::String(value)),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            visible: self.mode.shows_spinners(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() {
            println!("[{}/{}]", current, total);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("  {}", hint);
        }
    }

    fn show_run_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }

        println!();
        println!("  ┌─ Summary ──────────────────────────");
        for step in &summary.steps {
            let detail = step.detail.as_deref().unwrap_or("");
            println!("  │ {} {:<26} {}", step.status.icon(), step.name, detail);
        }
        println!("  ├────────────────────────────────────");
        println!(
            "  │ Total: {} · {} failed",
            format_duration(summary.total_duration),
            summary.failures,
        );
        println!("  └────────────────────────────────────");
    }
}

/// Spinner that prints only the final line.
struct NoopSpinner {
    visible: bool,
}

impl NoopSpinner {
    fn print(&self, line: String) {
        if self.visible {
            println!("  {}", line);
        }
    }
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.print(KitupTheme::plain().format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        self.print(KitupTheme::plain().format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.print(KitupTheme::plain().format_skipped(msg));
    }
}
