//! Typed description of the machine being provisioned.
//!
//! [`HostEnvironment`] is built once before any step runs and passed to
//! every step. It replaces evaluating `brew shellenv` in-process: steps
//! call Homebrew by absolute path and spawn children with
//! [`HostEnvironment::child_path`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::detection::{Architecture, ShellKind};
use crate::config::Settings;

/// Facts about the host, derived once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    /// CPU architecture class.
    pub arch: Architecture,
    /// Active shell.
    pub shell: ShellKind,
    /// The user's home directory.
    pub home: PathBuf,
    /// Shell startup file that receives PATH edits.
    pub startup_file: PathBuf,
    /// Homebrew install prefix.
    pub brew_prefix: PathBuf,
    /// Assistant CLI bin directory as configured (relative to home unless absolute).
    assistant_bin_rel: PathBuf,
    /// Process search path at detection time.
    system_path: Vec<PathBuf>,
}

impl HostEnvironment {
    /// Build a host description from explicit facts.
    pub fn new(arch: Architecture, shell: ShellKind, home: &Path, settings: &Settings) -> Self {
        Self {
            arch,
            shell,
            home: home.to_path_buf(),
            startup_file: home.join(shell.startup_file_name()),
            brew_prefix: arch.brew_prefix(),
            assistant_bin_rel: settings.assistant.bin_dir.clone(),
            system_path: Vec::new(),
        }
    }

    /// Detect the running host.
    pub fn detect(settings: &Settings) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        let host = Self::new(Architecture::detect(), ShellKind::detect(), &home, settings)
            .with_system_path(parse_system_path());
        tracing::debug!(
            "Detected {} host, {} shell, startup file {}",
            host.arch.label(),
            host.shell.name(),
            host.startup_file.display()
        );
        host
    }

    /// Replace the captured process search path.
    pub fn with_system_path(mut self, path: Vec<PathBuf>) -> Self {
        self.system_path = path;
        self
    }

    /// Absolute path of the `brew` executable.
    pub fn brew_bin(&self) -> PathBuf {
        self.brew_prefix.join("bin").join("brew")
    }

    /// Startup-file line that activates Homebrew in new shells.
    pub fn brew_activation_line(&self) -> String {
        format!("eval \"$({} shellenv)\"", self.brew_bin().display())
    }

    /// Absolute assistant CLI bin directory.
    pub fn assistant_bin_dir(&self) -> PathBuf {
        if self.assistant_bin_rel.is_absolute() {
            self.assistant_bin_rel.clone()
        } else {
            self.home.join(&self.assistant_bin_rel)
        }
    }

    /// Startup-file line that puts the assistant CLI on PATH.
    pub fn assistant_path_line(&self) -> String {
        let dir = if self.assistant_bin_rel.is_absolute() {
            self.assistant_bin_rel.display().to_string()
        } else {
            format!("$HOME/{}", self.assistant_bin_rel.display())
        };
        format!("export PATH=\"{}:$PATH\"", dir)
    }

    /// Directories that new shells will have on PATH after provisioning
    /// but the current process may not.
    pub fn extra_search_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.brew_prefix.join("bin"),
            self.brew_prefix.join("sbin"),
            self.assistant_bin_dir(),
        ]
    }

    /// Full search path: extra directories first, then the process PATH,
    /// without duplicates.
    pub fn search_path(&self) -> Vec<PathBuf> {
        let mut dirs = self.extra_search_dirs();
        for dir in &self.system_path {
            if !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }
        dirs
    }

    /// PATH value for spawned children.
    pub fn child_path(&self) -> OsString {
        std::env::join_paths(self.search_path()).unwrap_or_default()
    }
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}
