//! Presence checks.
//!
//! A presence check answers one of three questions without side effects:
//! is an executable resolvable on the search path, is a package registered
//! in Homebrew's local database, does a filesystem path exist. Install
//! steps consult a [`PresenceChecker`] before acting so that tools already
//! on the machine are never reinstalled.

use std::path::{Path, PathBuf};

use crate::shell::{CommandRunner, CommandSpec};

/// Kind of Homebrew package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageKind {
    /// A command-line formula (`brew install <name>`).
    Formula,
    /// An application cask (`brew install --cask <name>`).
    Cask,
}

/// Side-effect-free presence predicates.
pub trait PresenceChecker {
    /// Resolve an executable by name on the search path.
    fn executable(&self, name: &str) -> Option<PathBuf>;

    /// Whether an executable by this name is resolvable.
    fn exists(&self, name: &str) -> bool {
        self.executable(name).is_some()
    }

    /// Whether Homebrew at `brew` has `name` registered as installed.
    fn package_installed(&self, brew: &Path, name: &str, kind: PackageKind) -> bool;

    /// Whether a filesystem path exists.
    fn path_exists(&self, path: &Path) -> bool;
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that is a regular file with an executable
/// bit. Does NOT shell out to `which`, whose behavior varies across
/// systems and is sometimes a builtin.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Presence checks against the real machine.
pub struct SystemPresence<'a> {
    search_path: Vec<PathBuf>,
    runner: &'a dyn CommandRunner,
}

impl<'a> SystemPresence<'a> {
    /// Create a checker that resolves executables on `search_path` and
    /// queries Homebrew through `runner`.
    pub fn new(search_path: Vec<PathBuf>, runner: &'a dyn CommandRunner) -> Self {
        Self {
            search_path,
            runner,
        }
    }

    /// The directories searched for executables.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }
}

/// Homebrew query that exits 0 only if `name` is installed.
pub fn brew_list_command(brew: &Path, name: &str, kind: PackageKind) -> CommandSpec {
    let spec = CommandSpec::new(brew.display().to_string()).arg("list");
    let spec = match kind {
        PackageKind::Formula => spec,
        PackageKind::Cask => spec.arg("--cask"),
    };
    spec.args(["--versions", name])
}

impl PresenceChecker for SystemPresence<'_> {
    fn executable(&self, name: &str) -> Option<PathBuf> {
        resolve_tool_path(name, &self.search_path)
    }

    fn package_installed(&self, brew: &Path, name: &str, kind: PackageKind) -> bool {
        let spec = brew_list_command(brew, name, kind);
        match self.runner.capture(&spec) {
            Ok(result) => result.success && !result.stdout.trim().is_empty(),
            Err(e) => {
                tracing::debug!("'{}' could not run: {}", spec.command_line(), e);
                false
            }
        }
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
