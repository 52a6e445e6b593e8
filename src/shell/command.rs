//! External command execution.
//!
//! Every process kitup starts goes through a [`CommandRunner`], so the
//! install steps can be exercised against [`MockRunner`](super::MockRunner)
//! in tests.

use crate::error::{KitupError, Result};
use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A command to run: program, arguments, extra environment and optional
/// standard input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or absolute path.
    pub program: String,
    /// Arguments.
    pub args: Vec<String>,
    /// Environment variables merged over the inherited environment.
    pub env: Vec<(String, String)>,
    /// Data written to the child's standard input.
    pub stdin: Option<String>,
    /// Text shown to the operator instead of the raw command line.
    pub label: Option<String>,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Feed `input` to the child's standard input.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Replace the operator-facing description.
    pub fn described_as(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Program and arguments joined by spaces.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// What to show the operator.
    pub fn display(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.command_line())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Turn a non-zero exit into [`KitupError::CommandFailed`].
    pub fn check(self, spec: &CommandSpec) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(KitupError::CommandFailed {
                command: spec.display(),
                code: self.exit_code,
            })
        }
    }

    /// First non-empty line of stdout, falling back to stderr.
    pub fn first_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .chain(self.stderr.lines())
            .map(str::trim)
            .find(|l| !l.is_empty())
    }
}

/// Runs external commands.
pub trait CommandRunner {
    /// Run with the terminal attached (stdout/stderr inherited).
    ///
    /// Used for installers and anything that changes the machine.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult>;

    /// Run with stdout/stderr captured. Used for read-only probes.
    fn capture(&self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// Runs real processes with a fixed search path.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    path: Option<OsString>,
}

impl SystemRunner {
    /// Runner that inherits the process PATH.
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Runner whose children see `path` as their PATH.
    pub fn with_path(path: OsString) -> Self {
        Self { path: Some(path) }
    }

    fn build(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(path) = &self.path {
            cmd.env("PATH", path);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        cmd
    }

    fn spawn_failed(spec: &CommandSpec, err: std::io::Error) -> KitupError {
        tracing::debug!("Failed to spawn '{}': {}", spec.program, err);
        KitupError::CommandFailed {
            command: spec.display(),
            code: None,
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let start = Instant::now();
        let mut cmd = self.build(spec);
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        let status = match &spec.stdin {
            Some(input) => {
                cmd.stdin(Stdio::piped());
                let mut child = cmd.spawn().map_err(|e| Self::spawn_failed(spec, e))?;
                // the pipe is dropped (closed) before waiting
                let written = match child.stdin.take() {
                    Some(mut pipe) => pipe.write_all(input.as_bytes()),
                    None => Ok(()),
                };
                let status = child.wait()?;
                match written {
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                        tracing::debug!(
                            "{} closed stdin before reading all input",
                            spec.display()
                        );
                    }
                    Err(e) => return Err(e.into()),
                    Ok(()) => {}
                }
                status
            }
            None => {
                cmd.stdin(Stdio::inherit());
                cmd.status().map_err(|e| Self::spawn_failed(spec, e))?
            }
        };

        let duration = start.elapsed();
        tracing::debug!("'{}' exited with {:?}", spec.display(), status.code());

        if status.success() {
            Ok(CommandResult::success(String::new(), String::new(), duration))
        } else {
            Ok(CommandResult::failure(
                status.code(),
                String::new(),
                String::new(),
                duration,
            ))
        }
    }

    fn capture(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let start = Instant::now();
        let mut cmd = self.build(spec);
        cmd.stdin(Stdio::null());

        let output = cmd.output().map_err(|e| Self::spawn_failed(spec, e))?;
        let duration = start.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_command_line_joins_args() {
        let spec = CommandSpec::new("brew").args(["install", "wget"]);
        assert_eq!(spec.command_line(), "brew install wget");
        assert_eq!(spec.display(), "brew install wget");
    }

    #[test]
    fn label_overrides_display() {
        let spec = CommandSpec::new("/bin/bash")
            .arg("-c")
            .arg("#!/bin/bash\n...")
            .described_as("Homebrew installer");
        assert_eq!(spec.display(), "Homebrew installer");
        assert!(spec.command_line().starts_with("/bin/bash -c"));
    }

    #[test]
    fn check_converts_failure() {
        let spec = CommandSpec::new("false");
        let result = CommandResult::failure(Some(1), String::new(), String::new(), Duration::ZERO);
        match result.check(&spec) {
            Err(KitupError::CommandFailed { command, code }) => {
                assert_eq!(command, "false");
                assert_eq!(code, Some(1));
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn first_line_skips_blank_lines() {
        let result = CommandResult::success(
            "\n  v20.11.0\nextra\n".to_string(),
            String::new(),
            Duration::ZERO,
        );
        assert_eq!(result.first_line(), Some("v20.11.0"));
    }

    #[test]
    fn first_line_falls_back_to_stderr() {
        let result = CommandResult::success(
            String::new(),
            "Python 3.12.1\n".to_string(),
            Duration::ZERO,
        );
        assert_eq!(result.first_line(), Some("Python 3.12.1"));
    }

    #[cfg(unix)]
    #[test]
    fn capture_collects_stdout() {
        let runner = SystemRunner::new();
        let spec = CommandSpec::new("sh").args(["-c", "echo hello"]);
        let result = runner.capture(&spec).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn capture_reports_exit_code() {
        let runner = SystemRunner::new();
        let spec = CommandSpec::new("sh").args(["-c", "exit 3"]);
        let result = runner.capture(&spec).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn run_feeds_stdin() {
        let runner = SystemRunner::new();
        let spec = CommandSpec::new("sh").stdin("exit 0\n");
        assert!(runner.run(&spec).unwrap().success);

        let failing = CommandSpec::new("sh").stdin("exit 7\n");
        assert_eq!(runner.run(&failing).unwrap().exit_code, Some(7));
    }

    #[cfg(unix)]
    #[test]
    fn run_reports_exit_when_child_ignores_stdin() {
        let runner = SystemRunner::new();
        // larger than a pipe buffer, so the write fails once the child exits
        let input = "# filler\n".repeat(64 * 1024);
        let spec = CommandSpec::new("sh").args(["-c", "exit 5"]).stdin(input);
        assert_eq!(runner.run(&spec).unwrap().exit_code, Some(5));
    }

    #[cfg(unix)]
    #[test]
    fn capture_passes_env() {
        let runner = SystemRunner::new();
        let spec = CommandSpec::new("sh")
            .args(["-c", "echo $KITUP_TEST_VAR"])
            .env("KITUP_TEST_VAR", "value42");
        let result = runner.capture(&spec).unwrap();
        assert!(result.stdout.contains("value42"));
    }

    #[test]
    fn missing_program_is_command_failed() {
        let runner = SystemRunner::new();
        let spec = CommandSpec::new("kitup-definitely-not-a-real-program");
        assert!(matches!(
            runner.capture(&spec),
            Err(KitupError::CommandFailed { code: None, .. })
        ));
    }
}
