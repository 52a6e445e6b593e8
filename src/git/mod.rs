//! Access to the user's global Git configuration.
//!
//! Only two keys matter here, `user.name` and `user.email`, and only the
//! global (per-user) scope is ever read or written.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::shell::{CommandRunner, CommandSpec};

/// Global Git configuration key for the author name.
pub const USER_NAME: &str = "user.name";

/// Global Git configuration key for the author email.
pub const USER_EMAIL: &str = "user.email";

/// Read/write access to global Git configuration.
pub trait GitConfig {
    /// Current value of `key`, or `None` if unset or empty.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist `value` for `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// `git config --global` backed by a [`CommandRunner`].
pub struct GlobalGitConfig<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> GlobalGitConfig<'a> {
    /// Create a config accessor that shells out through `runner`.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }
}

/// Command that prints the global value of `key`.
pub fn get_command(key: &str) -> CommandSpec {
    CommandSpec::new("git").args(["config", "--global", "--get", key])
}

/// Command that sets the global value of `key`.
pub fn set_command(key: &str, value: &str) -> CommandSpec {
    CommandSpec::new("git").args(["config", "--global", key, value])
}

impl GitConfig for GlobalGitConfig<'_> {
    fn get(&self, key: &str) -> Option<String> {
        let result = self.runner.capture(&get_command(key)).ok()?;
        if !result.success {
            return None;
        }
        let value = result.stdout.trim_end_matches(['\n', '\r']).to_string();
        (!value.trim().is_empty()).then_some(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let spec = set_command(key, value);
        self.runner.capture(&spec)?.check(&spec)?;
        Ok(())
    }
}

/// In-memory Git configuration for tests.
#[derive(Debug, Default)]
pub struct MemoryGitConfig {
    values: RefCell<BTreeMap<String, String>>,
    writes: RefCell<usize>,
}

impl MemoryGitConfig {
    /// Empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration pre-populated with `key = value`.
    pub fn with(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl GitConfig for MemoryGitConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .borrow()
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        *self.writes.borrow_mut() += 1;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
