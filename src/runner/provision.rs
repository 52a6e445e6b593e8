//! The full provisioning flow.

use crate::steps::StepContext;
use crate::ui::UserInterface;

use super::report::print_report;
use super::verify::{catalog, VerificationReport, Verifier};
use super::workflow::{RunReport, WorkflowRunner};

/// Everything a provisioning run produced.
#[derive(Debug, Clone)]
pub struct ProvisionResult {
    /// Step outcomes.
    pub report: RunReport,
    /// Tool checks; `None` when fail-fast aborted the run.
    pub verification: Option<VerificationReport>,
}

impl ProvisionResult {
    /// Process exit code: 0 with no failures, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.report.success() {
            0
        } else {
            1
        }
    }
}

/// Run the steps, verify the toolset, and print the report.
pub fn provision(
    runner: &WorkflowRunner,
    ctx: &StepContext<'_>,
    ui: &mut dyn UserInterface,
) -> ProvisionResult {
    let report = runner.run(ctx, ui);

    let verification = if report.aborted {
        tracing::debug!("Skipping verification after fail-fast abort");
        None
    } else {
        let verifier = Verifier::new(ctx.presence, ctx.runner);
        Some(verifier.run(&catalog(ctx.host, ctx.settings), ui))
    };

    print_report(&report, ctx.host, ui);

    ProvisionResult {
        report,
        verification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunMode;
    use crate::git::{GitConfig, USER_NAME};
    use crate::identity::StaticIdentity;
    use crate::steps::testing::Fixture;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn best_effort_always_verifies() {
        let temp = TempDir::new().unwrap();
        let mut fx = Fixture::new(temp.path());
        fx.identity = StaticIdentity::new(Some("Ada Lovelace"), None);
        fx.runner.fail_on("/opt/homebrew/bin/brew install");
        let mut ui = MockUI::new();

        let result = provision(&WorkflowRunner::standard(), &fx.ctx(false), &mut ui);

        assert!(result.verification.is_some());
        assert_eq!(result.exit_code(), 1);
        assert_eq!(fx.git.get(USER_NAME).as_deref(), Some("Ada Lovelace"));
        assert!(ui.headers().contains(&"Verification".to_string()));
        assert_eq!(ui.summaries().len(), 1);
    }

    #[test]
    fn fail_fast_abort_skips_verification() {
        let temp = TempDir::new().unwrap();
        let mut fx = Fixture::new(temp.path());
        fx.mode = RunMode::FailFast;
        let mut ui = MockUI::new();

        // The Command Line Tools re-check fails with the default mock.
        let result = provision(&WorkflowRunner::standard(), &fx.ctx(false), &mut ui);

        assert!(result.report.aborted);
        assert!(result.verification.is_none());
        assert!(ui.spinners().is_empty());
        assert!(ui.has_error("installation may be incomplete"));
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn unanswerable_name_prompt_fails_the_step_instead_of_looping() {
        let temp = TempDir::new().unwrap();
        let fx = Fixture::new(temp.path());
        let mut ui = MockUI::new();

        let result = provision(&WorkflowRunner::standard(), &fx.ctx(false), &mut ui);

        let git = result
            .report
            .outcomes
            .iter()
            .find(|o| o.name == "Git identity")
            .unwrap();
        assert!(git.is_failure());
        assert_eq!(fx.git.writes(), 0);
        assert!(result.verification.is_some());
    }
}
