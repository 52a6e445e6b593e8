//! Scripted command runner for tests.
//!
//! `MockRunner` records every command it is asked to run and answers
//! from a table of canned outputs. Nothing is spawned.
//!
//! # Example
//!
//! ```
//! use kitup::shell::{CommandRunner, CommandSpec, MockRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.set_output("git --version", "git version 2.44.0");
//! runner.fail_on("brew install node");
//!
//! let version = runner.capture(&CommandSpec::new("git").arg("--version")).unwrap();
//! assert_eq!(version.first_line(), Some("git version 2.44.0"));
//!
//! let install = runner.run(&CommandSpec::new("brew").args(["install", "node"])).unwrap();
//! assert!(!install.success);
//! assert!(runner.ran("brew install node"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandResult, CommandRunner, CommandSpec};

/// Mock command runner.
///
/// `run` succeeds unless the command line starts with a registered
/// failure prefix. `capture` succeeds only for command lines with a
/// registered output; anything else behaves like a probe that found
/// nothing (exit 1).
#[derive(Debug, Default)]
pub struct MockRunner {
    outputs: RefCell<HashMap<String, String>>,
    effects: Vec<(String, String, String)>,
    failures: Vec<String>,
    runs: RefCell<Vec<CommandSpec>>,
    captures: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `capture` of exactly `command_line` with `stdout`.
    pub fn set_output(&mut self, command_line: &str, stdout: &str) {
        self.outputs
            .borrow_mut()
            .insert(command_line.to_string(), stdout.to_string());
    }

    /// Once a successful `run` starts with `run_prefix`, answer `capture`
    /// of `command_line` with `stdout`. Models an installer making a
    /// later probe succeed.
    pub fn set_output_after(&mut self, run_prefix: &str, command_line: &str, stdout: &str) {
        self.effects.push((
            run_prefix.to_string(),
            command_line.to_string(),
            stdout.to_string(),
        ));
    }

    /// Make any command starting with `prefix` exit 1.
    pub fn fail_on(&mut self, prefix: &str) {
        self.failures.push(prefix.to_string());
    }

    /// Command lines passed to `run`, in order.
    pub fn runs(&self) -> Vec<String> {
        self.runs.borrow().iter().map(|s| s.command_line()).collect()
    }

    /// Full specs passed to `run`, in order.
    pub fn run_specs(&self) -> Vec<CommandSpec> {
        self.runs.borrow().clone()
    }

    /// Command lines passed to `capture`, in order.
    pub fn captures(&self) -> Vec<String> {
        self.captures.borrow().clone()
    }

    /// Whether `run` was called with a command line starting with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.runs
            .borrow()
            .iter()
            .any(|s| s.command_line().starts_with(prefix))
    }

    fn fails(&self, line: &str) -> bool {
        self.failures.iter().any(|p| line.starts_with(p.as_str()))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let line = spec.command_line();
        self.runs.borrow_mut().push(spec.clone());
        if self.fails(&line) {
            return Ok(CommandResult::failure(
                Some(1),
                String::new(),
                String::new(),
                Duration::ZERO,
            ));
        }
        for (prefix, probe, stdout) in &self.effects {
            if line.starts_with(prefix.as_str()) {
                self.outputs
                    .borrow_mut()
                    .insert(probe.clone(), stdout.clone());
            }
        }
        Ok(CommandResult::success(
            String::new(),
            String::new(),
            Duration::ZERO,
        ))
    }

    fn capture(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let line = spec.command_line();
        self.captures.borrow_mut().push(line.clone());
        let output = self.outputs.borrow().get(&line).cloned();
        match output {
            Some(stdout) if !self.fails(&line) => Ok(CommandResult::success(
                stdout,
                String::new(),
                Duration::ZERO,
            )),
            _ => Ok(CommandResult::failure(
                Some(1),
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
        }
    }
}
