//! Append-only editing of the shell startup file.
//!
//! Lines are only ever appended, and only when the exact text is not
//! already somewhere in the file. Running the provisioning flow any
//! number of times leaves each line present exactly once.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Outcome of [`StartupFile::ensure_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// The line was appended.
    Appended,
    /// An identical line was already present.
    AlreadyPresent,
}

/// A shell startup file such as `~/.zshrc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupFile {
    path: PathBuf,
}

impl StartupFile {
    /// Wrap a startup file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file's location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file (and its parent directory) if missing.
    ///
    /// Returns `true` if the file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        tracing::debug!("Created {}", self.path.display());
        Ok(true)
    }

    /// Whether `line` already appears in the file.
    pub fn contains(&self, line: &str) -> Result<bool> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.contains(line)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Append `line` unless it is already present.
    pub fn ensure_line(&self, line: &str) -> Result<LineStatus> {
        self.ensure_exists()?;

        let content = fs::read_to_string(&self.path)?;
        if content.contains(line) {
            return Ok(LineStatus::AlreadyPresent);
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        if !content.is_empty() && !content.ends_with('\n') {
            writeln!(file)?;
        }
        writeln!(file, "{}", line)?;
        tracing::debug!("Appended to {}: {}", self.path.display(), line);
        Ok(LineStatus::Appended)
    }
}
