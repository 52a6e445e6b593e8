//! End-to-end provisioning scenarios through the public API.
//!
//! Every external effect is mocked except the startup file, which lives
//! in a temporary home directory.

use std::fs;
use std::path::Path;

use kitup::config::{RunMode, Settings};
use kitup::environment::{Architecture, HostEnvironment, ShellKind};
use kitup::fetch::MockFetcher;
use kitup::git::{GitConfig, MemoryGitConfig, USER_EMAIL, USER_NAME};
use kitup::identity::StaticIdentity;
use kitup::requirements::MockPresence;
use kitup::runner::{provision, Banner, WorkflowRunner};
use kitup::shell::{MockRunner, StartupFile};
use kitup::steps::{StepContext, StepStatus};
use kitup::ui::MockUI;
use tempfile::TempDir;

const BREW_LINE: &str = "eval \"$(/opt/homebrew/bin/brew shellenv)\"";
const ASSISTANT_LINE: &str = "export PATH=\"$HOME/.local/bin:$PATH\"";

struct Machine {
    host: HostEnvironment,
    settings: Settings,
    mode: RunMode,
    presence: MockPresence,
    runner: MockRunner,
    fetcher: MockFetcher,
    identity: StaticIdentity,
    git: MemoryGitConfig,
}

impl Machine {
    fn fresh(home: &Path, shell: ShellKind) -> Self {
        let settings = Settings::default();
        let fetcher = MockFetcher::new()
            .with_script(&settings.package_manager.install_url, "echo brew")
            .with_script(&settings.assistant.install_url, "echo assistant");
        let mut runner = MockRunner::new();
        runner.set_output_after(
            "xcode-select --install",
            "xcode-select -p",
            "/Library/Developer/CommandLineTools\n",
        );
        Self {
            host: HostEnvironment::new(Architecture::AppleSilicon, shell, home, &settings),
            settings,
            mode: RunMode::BestEffort,
            presence: MockPresence::new(),
            runner,
            fetcher,
            identity: StaticIdentity::new(Some("Ada Lovelace"), None),
            git: MemoryGitConfig::new(),
        }
    }

    fn ctx(&self, dry_run: bool) -> StepContext<'_> {
        StepContext {
            host: &self.host,
            settings: &self.settings,
            mode: self.mode,
            presence: &self.presence,
            runner: &self.runner,
            fetcher: &self.fetcher,
            identity: &self.identity,
            git: &self.git,
            startup: StartupFile::new(self.host.startup_file.clone()),
            dry_run,
        }
    }

    fn startup(&self) -> String {
        fs::read_to_string(&self.host.startup_file).unwrap_or_default()
    }
}

#[test]
fn fresh_apple_silicon_zsh_machine() {
    let temp = TempDir::new().unwrap();
    let machine = Machine::fresh(temp.path(), ShellKind::Zsh);
    let mut ui = MockUI::new();

    let result = provision(&WorkflowRunner::standard(), &machine.ctx(false), &mut ui);

    assert_eq!(result.report.failure_count(), 0);
    assert_eq!(result.exit_code(), 0);
    assert!(result.verification.is_some());

    let startup = machine.startup();
    assert_eq!(startup.matches(BREW_LINE).count(), 1);
    assert_eq!(startup.matches(ASSISTANT_LINE).count(), 1);

    assert_eq!(machine.git.get(USER_NAME).as_deref(), Some("Ada Lovelace"));
    assert_eq!(machine.git.get(USER_EMAIL).as_deref(), Some("you@example.com"));

    assert!(machine.runner.ran("xcode-select --install"));
    assert!(machine.runner.ran("/opt/homebrew/bin/brew install wget"));
    assert!(machine
        .runner
        .ran("/opt/homebrew/bin/brew install --cask visual-studio-code"));
    assert!(ui.has_success("All done!"));
}

#[test]
fn second_run_leaves_startup_file_unchanged() {
    let temp = TempDir::new().unwrap();
    let machine = Machine::fresh(temp.path(), ShellKind::Zsh);

    let mut first = MockUI::new();
    provision(&WorkflowRunner::standard(), &machine.ctx(false), &mut first);
    let after_first = machine.startup();

    let mut second = MockUI::new();
    let result = provision(&WorkflowRunner::standard(), &machine.ctx(false), &mut second);

    assert_eq!(machine.startup(), after_first);
    assert_eq!(result.exit_code(), 0);
    assert_eq!(machine.git.writes(), 2);
    let git_step = result
        .report
        .outcomes
        .iter()
        .find(|o| o.name == "Git identity")
        .unwrap();
    assert_eq!(git_step.status, StepStatus::AlreadyPresent);
}

#[test]
fn failed_packages_are_counted_individually() {
    let temp = TempDir::new().unwrap();
    let mut machine = Machine::fresh(temp.path(), ShellKind::Zsh);
    machine.runner.fail_on("/opt/homebrew/bin/brew install node");
    machine.runner.fail_on("/opt/homebrew/bin/brew install git");
    let mut ui = MockUI::new();

    let result = provision(&WorkflowRunner::standard(), &machine.ctx(false), &mut ui);

    assert_eq!(result.report.failure_count(), 2);
    assert_eq!(result.exit_code(), 1);
    assert!(!result.report.aborted);
    // later steps still ran
    assert!(machine
        .runner
        .ran("/opt/homebrew/bin/brew install --cask visual-studio-code"));
    assert!(machine.runner.ran("/opt/homebrew/bin/brew install python"));
    assert!(ui.has_warning("2 failure"));
}

#[test]
fn existing_git_identity_is_kept() {
    let temp = TempDir::new().unwrap();
    let mut machine = Machine::fresh(temp.path(), ShellKind::Zsh);
    machine.git = MemoryGitConfig::new()
        .with(USER_NAME, "Grace Hopper")
        .with(USER_EMAIL, "grace@navy.mil");
    let mut ui = MockUI::new();

    provision(&WorkflowRunner::standard(), &machine.ctx(false), &mut ui);

    assert_eq!(machine.git.writes(), 0);
    assert_eq!(machine.git.get(USER_NAME).as_deref(), Some("Grace Hopper"));
    assert!(ui.prompts_shown().contains(&"reconfigure_git".to_string()));
    assert!(!ui.prompts_shown().contains(&"git_name".to_string()));
}

#[test]
fn installed_tools_are_not_reinstalled() {
    let temp = TempDir::new().unwrap();
    let mut machine = Machine::fresh(temp.path(), ShellKind::Zsh);
    machine
        .runner
        .set_output("xcode-select -p", "/Library/Developer/CommandLineTools\n");
    let mut presence = MockPresence::new()
        .with_executable("brew")
        .with_executable("code");
    for package in &machine.settings.packages {
        presence = presence.with_formula(package);
    }
    machine.presence = presence;
    let mut ui = MockUI::new();

    let result = provision(&WorkflowRunner::standard(), &machine.ctx(false), &mut ui);

    assert_eq!(result.exit_code(), 0);
    assert!(!machine.runner.ran("xcode-select --install"));
    assert!(!machine.runner.ran("/bin/bash -c"));
    assert!(!machine.runner.ran("/opt/homebrew/bin/brew install"));
    // brew activation is still ensured for an existing install
    assert_eq!(machine.startup().matches(BREW_LINE).count(), 1);
}

#[test]
fn fail_fast_stops_and_skips_verification() {
    let temp = TempDir::new().unwrap();
    let mut machine = Machine::fresh(temp.path(), ShellKind::Zsh);
    machine.mode = RunMode::FailFast;
    machine.runner.fail_on("/bin/bash -c");
    let mut ui = MockUI::new();

    let result = provision(&WorkflowRunner::standard(), &machine.ctx(false), &mut ui);

    assert!(result.report.aborted);
    assert!(result.verification.is_none());
    assert_eq!(result.exit_code(), 1);
    assert!(!machine.runner.ran("/opt/homebrew/bin/brew"));
    let statuses: Vec<StepStatus> = result.report.outcomes.iter().map(|o| o.status).collect();
    assert_eq!(statuses[1], StepStatus::Failed);
    assert!(statuses[2..].iter().all(|s| *s == StepStatus::NotRun));
    assert_eq!(
        kitup::runner::banner(&result.report),
        Banner::Aborted("Homebrew".to_string())
    );
    assert!(!machine.startup().contains(BREW_LINE));
}

#[test]
fn bash_shell_edits_bash_profile() {
    let temp = TempDir::new().unwrap();
    let machine = Machine::fresh(temp.path(), ShellKind::Bash);
    let mut ui = MockUI::new();

    provision(&WorkflowRunner::standard(), &machine.ctx(false), &mut ui);

    let profile = fs::read_to_string(temp.path().join(".bash_profile")).unwrap();
    assert!(profile.contains(BREW_LINE));
    assert!(profile.contains(ASSISTANT_LINE));
    assert!(!temp.path().join(".zshrc").exists());
}

#[test]
fn dry_run_changes_nothing() {
    let temp = TempDir::new().unwrap();
    let machine = Machine::fresh(temp.path(), ShellKind::Zsh);
    let mut ui = MockUI::new();

    let result = provision(&WorkflowRunner::standard(), &machine.ctx(true), &mut ui);

    assert!(result.report.dry_run);
    assert!(machine.runner.runs().is_empty());
    assert!(machine.fetcher.fetched().is_empty());
    assert_eq!(machine.git.writes(), 0);
    assert!(!machine.host.startup_file.exists());
    assert!(ui.has_message("Would run: xcode-select --install"));
}
