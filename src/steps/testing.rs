//! Shared fixture for step unit tests.

use std::path::Path;

use crate::config::{RunMode, Settings};
use crate::environment::{Architecture, HostEnvironment, ShellKind};
use crate::fetch::MockFetcher;
use crate::git::MemoryGitConfig;
use crate::identity::StaticIdentity;
use crate::requirements::MockPresence;
use crate::shell::{MockRunner, StartupFile};

use super::StepContext;

pub(crate) struct Fixture {
    pub host: HostEnvironment,
    pub settings: Settings,
    pub mode: RunMode,
    pub presence: MockPresence,
    pub runner: MockRunner,
    pub fetcher: MockFetcher,
    pub identity: StaticIdentity,
    pub git: MemoryGitConfig,
}

impl Fixture {
    /// Fresh Apple Silicon + zsh host rooted at `home`; nothing installed.
    pub fn new(home: &Path) -> Self {
        let settings = Settings::default();
        let fetcher = MockFetcher::new()
            .with_script(&settings.package_manager.install_url, "echo brew")
            .with_script(&settings.assistant.install_url, "echo assistant");
        Self {
            host: HostEnvironment::new(Architecture::AppleSilicon, ShellKind::Zsh, home, &settings),
            settings,
            mode: RunMode::BestEffort,
            presence: MockPresence::new(),
            runner: MockRunner::new(),
            fetcher,
            identity: StaticIdentity::none(),
            git: MemoryGitConfig::new(),
        }
    }

    pub fn ctx(&self, dry_run: bool) -> StepContext<'_> {
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

    pub fn startup_content(&self) -> String {
        std::fs::read_to_string(&self.host.startup_file).unwrap_or_default()
    }
}
