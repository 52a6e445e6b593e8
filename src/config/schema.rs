//! Configuration schema definitions for kitup.
//!
//! This module contains the struct definitions that map to the optional
//! `~/.kitup/config.yml` file. Every field has a default, so an empty
//! file (or no file at all) yields the standard toolset.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the runner reacts to a failed step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Record the failure and continue with the next step.
    #[default]
    BestEffort,
    /// Abort the remaining steps on the first failure.
    FailFast,
}

impl RunMode {
    /// Whether a failure should stop the run.
    pub fn aborts_on_failure(self) -> bool {
        matches!(self, Self::FailFast)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BestEffort => write!(f, "best-effort"),
            Self::FailFast => write!(f, "fail-fast"),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Failure policy (overridden by `--mode` / `KITUP_MODE`).
    pub mode: RunMode,

    /// Homebrew formulae installed by the package batch, in order.
    pub packages: Vec<String>,

    /// Homebrew bootstrap settings.
    pub package_manager: PackageManagerSettings,

    /// Editor application settings.
    pub editor: EditorSettings,

    /// Assistant CLI settings.
    pub assistant: AssistantSettings,

    /// Git identity settings.
    pub git: GitSettings,
}

/// Homebrew bootstrap settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageManagerSettings {
    /// URL of the Homebrew install script.
    pub install_url: String,
}

impl Default for PackageManagerSettings {
    fn default() -> Self {
        Self {
            install_url: "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh"
                .to_string(),
        }
    }
}

/// Editor application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Homebrew cask token.
    pub cask: String,
    /// Application bundle location.
    pub app_path: PathBuf,
    /// Launcher command placed on PATH by the cask.
    pub command: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            cask: "visual-studio-code".to_string(),
            app_path: PathBuf::from("/Applications/Visual Studio Code.app"),
            command: "code".to_string(),
        }
    }
}

/// Assistant CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// URL of the assistant's install script.
    pub install_url: String,
    /// Directory the installer places the binary in, relative to `$HOME`
    /// unless absolute.
    pub bin_dir: PathBuf,
    /// Binary name.
    pub command: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            install_url: "https://claude.ai/install.sh".to_string(),
            bin_dir: PathBuf::from(".local/bin"),
            command: "claude".to_string(),
        }
    }
}

/// Git identity settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitSettings {
    /// Email offered when no account email can be detected.
    pub placeholder_email: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            placeholder_email: "you@example.com".to_string(),
        }
    }
}

fn default_packages() -> Vec<String> {
    ["wget", "curl", "git", "node", "python"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            packages: default_packages(),
            package_manager: PackageManagerSettings::default(),
            editor: EditorSettings::default(),
            assistant: AssistantSettings::default(),
            git: GitSettings::default(),
        }
    }
}
