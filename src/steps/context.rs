//! Everything an install step may touch.
//!
//! Steps never spawn processes, write files or download anything
//! directly. They go through the helpers on [`StepContext`], which honor
//! dry-run by describing the mutation instead of performing it. Read-only
//! probes (presence checks, Git lookups) run normally in dry-run.

use crate::config::{RunMode, Settings};
use crate::environment::HostEnvironment;
use crate::error::Result;
use crate::fetch::ScriptFetcher;
use crate::git::{self, GitConfig};
use crate::identity::IdentityHints;
use crate::requirements::PresenceChecker;
use crate::shell::{CommandResult, CommandRunner, CommandSpec, LineStatus, StartupFile};
use crate::ui::UserInterface;

/// Dependencies shared by all steps for one run.
pub struct StepContext<'a> {
    /// Detected host facts.
    pub host: &'a HostEnvironment,
    /// Loaded configuration.
    pub settings: &'a Settings,
    /// Failure policy in effect.
    pub mode: RunMode,
    /// Presence predicates.
    pub presence: &'a dyn PresenceChecker,
    /// Process runner for installers and probes.
    pub runner: &'a dyn CommandRunner,
    /// Installer script downloads.
    pub fetcher: &'a dyn ScriptFetcher,
    /// Identity suggestions for Git.
    pub identity: &'a dyn IdentityHints,
    /// Global Git configuration.
    pub git: &'a dyn GitConfig,
    /// The shell startup file.
    pub startup: StartupFile,
    /// Describe mutations instead of performing them.
    pub dry_run: bool,
}

impl<'a> StepContext<'a> {
    /// Run a mutating command with the terminal attached.
    pub fn execute(&self, ui: &mut dyn UserInterface, spec: &CommandSpec) -> Result<CommandResult> {
        if self.dry_run {
            ui.message(&format!("  Would run: {}", spec.display()));
            return Ok(CommandResult::success(
                String::new(),
                String::new(),
                std::time::Duration::ZERO,
            ));
        }
        tracing::debug!("Running {}", spec.display());
        self.runner.run(spec)
    }

    /// Append `line` to the startup file unless already present.
    pub fn ensure_startup_line(&self, ui: &mut dyn UserInterface, line: &str) -> Result<LineStatus> {
        if self.startup.contains(line)? {
            return Ok(LineStatus::AlreadyPresent);
        }
        if self.dry_run {
            ui.message(&format!(
                "  Would append to {}: {}",
                self.startup.path().display(),
                line
            ));
            return Ok(LineStatus::Appended);
        }
        self.startup.ensure_line(line)
    }

    /// Write a global Git setting.
    pub fn set_git(&self, ui: &mut dyn UserInterface, key: &str, value: &str) -> Result<()> {
        if self.dry_run {
            ui.message(&format!(
                "  Would run: {}",
                git::set_command(key, value).command_line()
            ));
            return Ok(());
        }
        self.git.set(key, value)
    }

    /// Download an installer script. Dry-run returns an empty script.
    pub fn fetch_script(&self, ui: &mut dyn UserInterface, url: &str) -> Result<String> {
        if self.dry_run {
            ui.message(&format!("  Would fetch {}", url));
            return Ok(String::new());
        }
        tracing::debug!("Fetching {}", url);
        self.fetcher.fetch(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::USER_NAME;
    use crate::steps::testing::Fixture;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn execute_runs_command() {
        let temp = TempDir::new().unwrap();
        let fx = Fixture::new(temp.path());
        let mut ui = MockUI::new();
        let result = fx
            .ctx(false)
            .execute(&mut ui, &CommandSpec::new("xcode-select").arg("--install"))
            .unwrap();
        assert!(result.success);
        assert_eq!(fx.runner.runs(), vec!["xcode-select --install"]);
    }

    #[test]
    fn dry_run_describes_instead_of_mutating() {
        let temp = TempDir::new().unwrap();
        let fx = Fixture::new(temp.path());
        let mut ui = MockUI::new();
        let ctx = fx.ctx(true);

        ctx.execute(&mut ui, &CommandSpec::new("brew").args(["install", "wget"]))
            .unwrap();
        let status = ctx
            .ensure_startup_line(&mut ui, "export PATH=\"$HOME/.local/bin:$PATH\"")
            .unwrap();
        ctx.set_git(&mut ui, USER_NAME, "Ada").unwrap();
        let script = ctx.fetch_script(&mut ui, "https://example.com/i.sh").unwrap();

        assert_eq!(status, LineStatus::Appended);
        assert!(script.is_empty());
        assert!(fx.runner.runs().is_empty());
        assert!(fx.fetcher.fetched().is_empty());
        assert_eq!(fx.git.writes(), 0);
        assert!(!fx.host.startup_file.exists());
        assert!(ui.has_message("Would run: brew install wget"));
        assert!(ui.has_message("Would append to"));
        assert!(ui.has_message("Would run: git config --global user.name Ada"));
        assert!(ui.has_message("Would fetch https://example.com/i.sh"));
    }

    #[test]
    fn startup_line_is_written_once() {
        let temp = TempDir::new().unwrap();
        let fx = Fixture::new(temp.path());
        let mut ui = MockUI::new();
        let ctx = fx.ctx(false);
        let line = fx.host.brew_activation_line();

        assert_eq!(ctx.ensure_startup_line(&mut ui, &line).unwrap(), LineStatus::Appended);
        assert_eq!(
            ctx.ensure_startup_line(&mut ui, &line).unwrap(),
            LineStatus::AlreadyPresent
        );
    }

    #[test]
    fn fetch_script_uses_fetcher() {
        let temp = TempDir::new().unwrap();
        let fx = Fixture::new(temp.path());
        let mut ui = MockUI::new();
        let url = fx.settings.assistant.install_url.clone();
        let script = fx.ctx(false).fetch_script(&mut ui, &url).unwrap();
        assert_eq!(script, "echo assistant");
        assert_eq!(fx.fetcher.fetched(), vec![url]);
    }
}
