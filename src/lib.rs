//! kitup - Provision a fresh macOS workstation.
//!
//! kitup installs a fixed developer toolset (Command Line Tools,
//! Homebrew, a CLI package batch, Visual Studio Code, the Claude Code
//! assistant CLI) and a baseline Git identity, then verifies the result.
//! Every step checks before it acts, so a second run changes nothing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional user configuration
//! - [`environment`] - Host detection (architecture, shell, paths)
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Installer script downloads
//! - [`git`] - Global Git configuration access
//! - [`identity`] - Name and email suggestions for Git
//! - [`requirements`] - Side-effect-free presence checks
//! - [`runner`] - Step orchestration, verification and reporting
//! - [`shell`] - Command execution and startup-file editing
//! - [`steps`] - The install steps
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use kitup::config::Settings;
//! use kitup::environment::{Architecture, HostEnvironment, ShellKind};
//!
//! let settings = Settings::default();
//! let host = HostEnvironment::new(
//!     Architecture::AppleSilicon,
//!     ShellKind::Zsh,
//!     Path::new("/Users/dev"),
//!     &settings,
//! );
//! assert_eq!(host.brew_activation_line(), "eval \"$(/opt/homebrew/bin/brew shellenv)\"");
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod git;
pub mod identity;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{KitupError, Result};
