//! Verify command implementation.
//!
//! The `kitup verify` command checks the toolset without installing
//! anything.

use std::path::{Path, PathBuf};

use crate::cli::args::VerifyArgs;
use crate::config::load_settings;
use crate::environment::HostEnvironment;
use crate::error::Result;
use crate::requirements::SystemPresence;
use crate::runner::{catalog, VerificationReport, Verifier};
use crate::shell::SystemRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The verify command implementation.
pub struct VerifyCommand {
    config_path: Option<PathBuf>,
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(config_path: Option<&Path>, args: VerifyArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

/// Pretty-printed JSON for `--json`.
pub fn render_json(report: &VerificationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report).map_err(anyhow::Error::from)?)
}

/// Exit 1 when anything is missing.
pub fn verification_result(report: &VerificationReport) -> CommandResult {
    if report.all_present() {
        CommandResult::success()
    } else {
        CommandResult::failure(1)
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = load_settings(self.config_path.as_deref())?;
        let host = HostEnvironment::detect(&settings);
        let runner = SystemRunner::with_path(host.child_path());
        let presence = SystemPresence::new(host.search_path(), &runner);
        let verifier = Verifier::new(&presence, &runner);
        let tools = catalog(&host, &settings);

        let report = if self.args.json {
            let report = verifier.check_all(&tools);
            println!("{}", render_json(&report)?);
            report
        } else {
            let report = verifier.run(&tools, ui);
            let missing = report.missing();
            if !missing.is_empty() {
                let labels: Vec<&str> = missing.iter().map(|t| t.label.as_str()).collect();
                ui.warning(&format!("Missing: {}", labels.join(", ")));
                ui.show_hint("Run `kitup run` to install them");
            }
            report
        };

        Ok(verification_result(&report))
    }
}
