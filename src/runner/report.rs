//! End-of-run reporting.

use std::path::Path;

use crate::environment::HostEnvironment;
use crate::ui::UserInterface;

use super::workflow::RunReport;

/// Closing banner for a finished run.
pub fn banner(report: &RunReport) -> Banner {
    let failures = report.failure_count();
    if report.aborted {
        Banner::Aborted(report.failed_steps().join(", "))
    } else if failures == 0 {
        Banner::Success
    } else {
        Banner::Failures(failures)
    }
}

/// How the run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// No failures.
    Success,
    /// Best-effort run with this many failures.
    Failures(usize),
    /// Fail-fast stopped after the named step(s).
    Aborted(String),
}

/// Show `path` relative to the home directory as `~/...`.
pub fn tilde_path(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Print the summary table, closing banner and next steps.
pub fn print_report(report: &RunReport, host: &HostEnvironment, ui: &mut dyn UserInterface) {
    ui.show_run_summary(&report.summary());

    if report.dry_run {
        ui.message("Dry run: nothing was changed.");
    }

    match banner(report) {
        Banner::Success => ui.success("All done! Your workstation is ready."),
        Banner::Failures(n) => ui.warning(&format!(
            "Finished with {} failure{}; some tools may need manual follow-up.",
            n,
            if n == 1 { "" } else { "s" }
        )),
        Banner::Aborted(step) => ui.error(&format!(
            "Stopped after '{}' failed; installation may be incomplete.",
            step
        )),
    }

    ui.message("");
    ui.message("Next steps:");
    ui.show_hint(&format!(
        "source {}",
        tilde_path(&host.startup_file, &host.home)
    ));
    ui.show_hint("claude --help");
    ui.show_hint("or open a new terminal session");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RunMode, Settings};
    use crate::environment::{Architecture, ShellKind};
    use crate::steps::StepOutcome;
    use crate::ui::MockUI;
    use std::path::PathBuf;
    use std::time::Duration;

    fn report(outcomes: Vec<StepOutcome>, aborted: bool) -> RunReport {
        RunReport {
            outcomes,
            duration: Duration::from_secs(3),
            mode: if aborted { RunMode::FailFast } else { RunMode::BestEffort },
            aborted,
            dry_run: false,
        }
    }

    fn host(shell: ShellKind) -> HostEnvironment {
        HostEnvironment::new(
            Architecture::AppleSilicon,
            shell,
            Path::new("/Users/dev"),
            &Settings::default(),
        )
    }

    #[test]
    fn banner_variants() {
        assert_eq!(
            banner(&report(vec![StepOutcome::completed("a", "x")], false)),
            Banner::Success
        );
        assert_eq!(
            banner(&report(
                vec![
                    StepOutcome::failed("a", "x"),
                    StepOutcome::partial("b", 2, "y")
                ],
                false
            )),
            Banner::Failures(3)
        );
        assert_eq!(
            banner(&report(
                vec![StepOutcome::failed("Homebrew", "x"), StepOutcome::not_run("b")],
                true
            )),
            Banner::Aborted("Homebrew".to_string())
        );
    }

    #[test]
    fn tilde_path_shortens_home() {
        assert_eq!(
            tilde_path(Path::new("/Users/dev/.zshrc"), Path::new("/Users/dev")),
            "~/.zshrc"
        );
        assert_eq!(
            tilde_path(&PathBuf::from("/etc/profile"), Path::new("/Users/dev")),
            "/etc/profile"
        );
    }

    #[test]
    fn success_report() {
        let mut ui = MockUI::new();
        print_report(
            &report(vec![StepOutcome::completed("a", "x")], false),
            &host(ShellKind::Zsh),
            &mut ui,
        );

        assert_eq!(ui.summaries().len(), 1);
        assert!(ui.has_success("All done!"));
        assert!(ui.has_hint("source ~/.zshrc"));
        assert!(ui.has_hint("claude --help"));
        assert!(ui.has_hint("new terminal session"));
    }

    #[test]
    fn failure_report_states_exact_count() {
        let mut ui = MockUI::new();
        print_report(
            &report(
                vec![
                    StepOutcome::failed("a", "x"),
                    StepOutcome::partial("b", 2, "y"),
                ],
                false,
            ),
            &host(ShellKind::Bash),
            &mut ui,
        );

        assert!(ui.has_warning("Finished with 3 failures"));
        assert!(ui.has_hint("source ~/.bash_profile"));
    }

    #[test]
    fn aborted_report_says_incomplete() {
        let mut ui = MockUI::new();
        print_report(
            &report(
                vec![StepOutcome::failed("Homebrew", "x"), StepOutcome::not_run("b")],
                true,
            ),
            &host(ShellKind::Zsh),
            &mut ui,
        );

        assert!(ui.has_error("installation may be incomplete"));
    }
}
