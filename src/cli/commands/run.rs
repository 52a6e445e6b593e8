//! Run command implementation.
//!
//! The `kitup run` command provisions the workstation: it detects the
//! host, runs the install steps, verifies the toolset and prints the
//! report.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::{load_settings, RunMode, Settings};
use crate::environment::HostEnvironment;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::git::GlobalGitConfig;
use crate::identity::MacIdentityHints;
use crate::requirements::SystemPresence;
use crate::runner::{provision, WorkflowRunner};
use crate::shell::{is_elevated, is_macos, StartupFile, SystemRunner};
use crate::steps::StepContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

/// Flag (or `KITUP_MODE`) beats the config file, which beats the default.
pub fn resolve_mode(flag: Option<RunMode>, settings: &Settings) -> RunMode {
    flag.unwrap_or(settings.mode)
}

/// Warn about hosts the installers are known to reject.
pub fn warn_about_host(ui: &mut dyn UserInterface, macos: bool, elevated: bool) {
    if !macos {
        ui.warning("kitup provisions macOS; installers will likely fail on this platform");
    }
    if elevated {
        ui.warning("Running as root: Homebrew refuses to install as root");
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = load_settings(self.config_path.as_deref())?;
        let mode = resolve_mode(self.args.mode, &settings);
        let host = HostEnvironment::detect(&settings);

        ui.show_header("kitup");
        ui.message(&format!(
            "{} Mac, {} shell, {} mode{}",
            host.arch.label(),
            host.shell.name(),
            mode,
            if self.args.dry_run { " (dry run)" } else { "" }
        ));
        warn_about_host(ui, is_macos(), is_elevated());

        let runner = SystemRunner::with_path(host.child_path());
        let presence = SystemPresence::new(host.search_path(), &runner);
        let fetcher = HttpFetcher::new()?;
        let identity = MacIdentityHints::new(&runner);
        let git = GlobalGitConfig::new(&runner);

        let ctx = StepContext {
            host: &host,
            settings: &settings,
            mode,
            presence: &presence,
            runner: &runner,
            fetcher: &fetcher,
            identity: &identity,
            git: &git,
            startup: StartupFile::new(host.startup_file.clone()),
            dry_run: self.args.dry_run,
        };

        let result = provision(&WorkflowRunner::standard(), &ctx, ui);
        Ok(CommandResult::from_exit_code(result.exit_code()))
    }
}
