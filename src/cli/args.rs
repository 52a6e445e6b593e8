//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::RunMode;

/// kitup - Provision a fresh macOS workstation.
#[derive(Debug, Parser)]
#[command(name = "kitup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default ~/.kitup/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether prompts must be answered without a terminal.
    pub fn non_interactive(&self) -> bool {
        matches!(&self.command, Some(Commands::Run(args)) if args.non_interactive)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the standard toolset (default if no command specified)
    Run(RunArgs),

    /// Check which tools are installed
    Verify(VerifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Failure policy
    #[arg(long, value_enum, env = "KITUP_MODE")]
    pub mode: Option<RunMode>,

    /// Never prompt; use defaults and KITUP_PROMPT_<KEY> overrides
    #[arg(long)]
    pub non_interactive: bool,

    /// Print what would change without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Arguments for a bare `kitup`: defaults, with `KITUP_MODE` applied
    /// the same way `kitup run` applies it.
    pub fn from_env() -> Result<Self, clap::Error> {
        let value = std::env::var("KITUP_MODE").ok();
        Ok(Self {
            mode: mode_from_env(value.as_deref())?,
            ..Self::default()
        })
    }
}

/// Parse a `KITUP_MODE` value; unset or blank means no override.
pub fn mode_from_env(value: Option<&str>) -> Result<Option<RunMode>, clap::Error> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => RunMode::from_str(v, false).map(Some).map_err(|_| {
            clap::Error::raw(
                ErrorKind::InvalidValue,
                format!(
                    "invalid value '{}' for KITUP_MODE [possible values: best-effort, fail-fast]\n",
                    v
                ),
            )
        }),
    }
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
