//! Configuration loading and schema for kitup.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use kitup::config::{parse_config, RunMode};
//! use std::path::Path;
//!
//! let settings = parse_config("mode: fail_fast", Path::new("config.yml")).unwrap();
//! assert_eq!(settings.mode, RunMode::FailFast);
//! assert_eq!(settings.packages.len(), 5);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_config_file, load_settings, parse_config};
pub use schema::{
    AssistantSettings, EditorSettings, GitSettings, PackageManagerSettings, RunMode, Settings,
};
