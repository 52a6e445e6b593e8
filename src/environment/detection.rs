//! Architecture and shell detection.
//!
//! Both detections always produce a value: an unrecognized machine name
//! is treated as Intel and an unrecognized or unset shell as zsh, the
//! default login shell on current macOS releases.

use std::path::{Path, PathBuf};

/// CPU architecture class of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    /// arm64 (M-series) Macs.
    AppleSilicon,
    /// x86_64 Macs.
    Intel,
}

impl Architecture {
    /// Classify a machine name as reported by `uname -m`.
    pub fn from_machine(machine: &str) -> Self {
        match machine.trim().to_lowercase().as_str() {
            "arm64" | "aarch64" => Self::AppleSilicon,
            _ => Self::Intel,
        }
    }

    /// Detect the architecture of the running host.
    pub fn detect() -> Self {
        match machine_name() {
            Some(machine) => Self::from_machine(&machine),
            None => Self::from_machine(std::env::consts::ARCH),
        }
    }

    /// Homebrew's install prefix for this architecture.
    pub fn brew_prefix(self) -> PathBuf {
        match self {
            Self::AppleSilicon => PathBuf::from("/opt/homebrew"),
            Self::Intel => PathBuf::from("/usr/local"),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::AppleSilicon => "Apple Silicon",
            Self::Intel => "Intel",
        }
    }
}

#[cfg(unix)]
fn machine_name() -> Option<String> {
    // SAFETY: utsname is a plain C struct of byte arrays; all-zero is valid.
    let mut info: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: uname only writes into the struct we own.
    if unsafe { libc::uname(&mut info) } != 0 {
        return None;
    }
    // SAFETY: uname NUL-terminates every field on success.
    let machine = unsafe { std::ffi::CStr::from_ptr(info.machine.as_ptr()) };
    Some(machine.to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn machine_name() -> Option<String> {
    None
}

/// Interactive shell whose startup file receives PATH edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellKind {
    Zsh,
    Bash,
}

impl ShellKind {
    /// Parse shell kind from the `$SHELL` value.
    ///
    /// Anything other than bash falls back to zsh.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => Self::Bash,
            _ => Self::Zsh,
        }
    }

    /// Detect from the `SHELL` environment variable.
    pub fn detect() -> Self {
        Self::detect_with_env(|key| std::env::var(key))
    }

    /// Detect with a custom env var lookup (for testing).
    pub fn detect_with_env<F>(env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        env_fn("SHELL")
            .map(|shell| Self::from_executable(&shell))
            .unwrap_or(Self::Zsh)
    }

    /// Startup file name relative to `$HOME`.
    pub fn startup_file_name(self) -> &'static str {
        match self {
            Self::Zsh => ".zshrc",
            Self::Bash => ".bash_profile",
        }
    }

    /// Shell name as typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Zsh => "zsh",
            Self::Bash => "bash",
        }
    }
}
