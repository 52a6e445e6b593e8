//! Remote installer script retrieval.
//!
//! Both bootstrap installers (Homebrew and the assistant CLI) are shell
//! scripts downloaded at run time and handed to `bash`. There is no
//! signature or checksum verification; the transport is HTTPS only.

pub mod http;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{KitupError, Result};

pub use http::HttpFetcher;

/// Downloads installer scripts.
pub trait ScriptFetcher {
    /// Fetch the script at `url`.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetcher with canned scripts for tests.
///
/// URLs without a registered script fail with `FetchFailed`.
#[derive(Debug, Default)]
pub struct MockFetcher {
    scripts: HashMap<String, String>,
    fetched: RefCell<Vec<String>>,
}

impl MockFetcher {
    /// Create a fetcher with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `script` for `url`.
    pub fn with_script(mut self, url: &str, script: &str) -> Self {
        self.scripts.insert(url.to_string(), script.to_string());
        self
    }

    /// URLs requested so far.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl ScriptFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.fetched.borrow_mut().push(url.to_string());
        self.scripts
            .get(url)
            .cloned()
            .ok_or_else(|| KitupError::FetchFailed {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
    }
}
