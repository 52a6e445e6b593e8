//! Command-line interface for kitup.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, RunArgs, VerifyArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
