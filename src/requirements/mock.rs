//! In-memory presence checker for tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::probe::{PackageKind, PresenceChecker};

/// Presence checker backed by fixed sets.
///
/// Everything is absent unless marked present.
#[derive(Debug, Default, Clone)]
pub struct MockPresence {
    executables: HashSet<String>,
    formulae: HashSet<String>,
    casks: HashSet<String>,
    paths: HashSet<PathBuf>,
}

impl MockPresence {
    /// Create a checker where nothing is installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an executable as resolvable.
    pub fn with_executable(mut self, name: &str) -> Self {
        self.executables.insert(name.to_string());
        self
    }

    /// Mark a Homebrew formula as installed.
    pub fn with_formula(mut self, name: &str) -> Self {
        self.formulae.insert(name.to_string());
        self
    }

    /// Mark a Homebrew cask as installed.
    pub fn with_cask(mut self, name: &str) -> Self {
        self.casks.insert(name.to_string());
        self
    }

    /// Mark a filesystem path as existing.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }
}

impl PresenceChecker for MockPresence {
    fn executable(&self, name: &str) -> Option<PathBuf> {
        self.executables
            .contains(name)
            .then(|| PathBuf::from("/mock/bin").join(name))
    }

    fn package_installed(&self, _brew: &Path, name: &str, kind: PackageKind) -> bool {
        match kind {
            PackageKind::Formula => self.formulae.contains(name),
            PackageKind::Cask => self.casks.contains(name),
        }
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }
}
