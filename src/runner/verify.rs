//! Post-install verification.
//!
//! Re-checks every tool in the catalog and reports its version. The
//! verifier only reads; it never installs anything.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Settings;
use crate::environment::HostEnvironment;
use crate::requirements::PresenceChecker;
use crate::shell::{CommandRunner, CommandSpec};
use crate::ui::UserInterface;

/// Where to look for a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolLocation {
    /// Resolve by name on the search path.
    SearchPath,
    /// Check one fixed file.
    Fixed(PathBuf),
}

/// One entry in the verification catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Executable name.
    pub command: String,
    /// Display label.
    pub label: String,
    /// How to find it.
    pub location: ToolLocation,
}

impl ToolSpec {
    fn on_path(command: &str, label: &str) -> Self {
        Self {
            command: command.to_string(),
            label: label.to_string(),
            location: ToolLocation::SearchPath,
        }
    }
}

/// The tools checked after provisioning.
///
/// The assistant CLI is checked at its install location rather than on
/// the search path, since the current shell may not have picked up the
/// new PATH entry yet.
pub fn catalog(host: &HostEnvironment, settings: &Settings) -> Vec<ToolSpec> {
    let assistant = &settings.assistant.command;
    vec![
        ToolSpec::on_path("wget", "wget"),
        ToolSpec::on_path("curl", "curl"),
        ToolSpec::on_path("git", "git"),
        ToolSpec::on_path("node", "node"),
        ToolSpec::on_path("npm", "npm"),
        ToolSpec::on_path("python3", "python3"),
        ToolSpec::on_path(&settings.editor.command, "Visual Studio Code"),
        ToolSpec::on_path("brew", "Homebrew"),
        ToolSpec {
            command: assistant.clone(),
            label: "Claude Code".to_string(),
            location: ToolLocation::Fixed(host.assistant_bin_dir().join(assistant)),
        },
    ]
}

/// Result of checking one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCheck {
    /// Executable name.
    pub command: String,
    /// Display label.
    pub label: String,
    /// Resolved location, if found.
    pub path: Option<PathBuf>,
    /// First line of `--version` output.
    pub version: Option<String>,
}

impl ToolCheck {
    /// Whether the tool was found.
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Result of checking the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Per-tool results in catalog order.
    pub tools: Vec<ToolCheck>,
}

impl VerificationReport {
    /// Tools that were not found.
    pub fn missing(&self) -> Vec<&ToolCheck> {
        self.tools.iter().filter(|t| !t.found()).collect()
    }

    /// Whether every tool was found.
    pub fn all_present(&self) -> bool {
        self.tools.iter().all(ToolCheck::found)
    }
}

/// Checks tool presence and versions.
pub struct Verifier<'a> {
    presence: &'a dyn PresenceChecker,
    runner: &'a dyn CommandRunner,
}

impl<'a> Verifier<'a> {
    /// Create a verifier.
    pub fn new(presence: &'a dyn PresenceChecker, runner: &'a dyn CommandRunner) -> Self {
        Self { presence, runner }
    }

    /// Check a single tool.
    pub fn check(&self, spec: &ToolSpec) -> ToolCheck {
        let path = match &spec.location {
            ToolLocation::SearchPath => self.presence.executable(&spec.command),
            ToolLocation::Fixed(path) => self.presence.path_exists(path).then(|| path.clone()),
        };
        let version = path.as_ref().and_then(|p| self.version(p));

        ToolCheck {
            command: spec.command.clone(),
            label: spec.label.clone(),
            path,
            version,
        }
    }

    fn version(&self, path: &std::path::Path) -> Option<String> {
        let spec = CommandSpec::new(path.display().to_string()).arg("--version");
        match self.runner.capture(&spec) {
            Ok(result) if result.success => result.first_line().map(String::from),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("{} --version failed: {}", path.display(), e);
                None
            }
        }
    }

    /// Check every tool without printing anything.
    pub fn check_all(&self, catalog: &[ToolSpec]) -> VerificationReport {
        VerificationReport {
            tools: catalog.iter().map(|spec| self.check(spec)).collect(),
        }
    }

    /// Check every tool, showing one line per tool.
    pub fn run(&self, catalog: &[ToolSpec], ui: &mut dyn UserInterface) -> VerificationReport {
        ui.show_header("Verification");
        let mut tools = Vec::with_capacity(catalog.len());

        for spec in catalog {
            let mut spinner = ui.start_spinner(&format!("Checking {}", spec.label));
            let check = self.check(spec);
            match (&check.path, &check.version) {
                (Some(_), Some(version)) => {
                    spinner.finish_success(&format!("{}: {}", spec.label, version))
                }
                (Some(_), None) => spinner.finish_success(&format!("{}: installed", spec.label)),
                (None, _) => spinner.finish_error(&format!("{}: not found", spec.label)),
            }
            tools.push(check);
        }

        VerificationReport { tools }
    }
}
