//! Configuration file discovery and loading.
//!
//! The only file consulted is the user's global config at
//! `~/.kitup/config.yml`, or the path given with `--config`.

use crate::config::schema::Settings;
use crate::error::{KitupError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the user config: `~/.kitup/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".kitup").join("config.yml"))
}

/// Load a single config file and parse it into [`Settings`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KitupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            KitupError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`Settings`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| KitupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load settings with optional path override.
///
/// An explicit override must exist. Without one, a missing default file
/// simply yields the defaults.
pub fn load_settings(config_override: Option<&Path>) -> Result<Settings> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        _ => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunMode;
    use tempfile::TempDir;

    #[test]
    fn load_config_file_reads_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "mode: fail_fast\npackages: [jq]\n").unwrap();

        let settings = load_config_file(&path).unwrap();
        assert_eq!(settings.mode, RunMode::FailFast);
        assert_eq!(settings.packages, vec!["jq"]);
    }

    #[test]
    fn load_config_file_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(&temp.path().join("nope.yml"));
        assert!(matches!(result, Err(KitupError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_reports_path_on_error() {
        let result = parse_config("packages: {oops", Path::new("/tmp/bad.yml"));
        match result {
            Err(KitupError::ConfigParseError { path, .. }) => {
                assert_eq!(path, PathBuf::from("/tmp/bad.yml"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn parse_config_empty_is_default() {
        let settings = parse_config("  \n", Path::new("config.yml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_settings_with_explicit_missing_path_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yml");
        assert!(load_settings(Some(&missing)).is_err());
    }

    #[test]
    fn default_config_path_ends_with_kitup_config() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(".kitup/config.yml"));
        }
    }
}
