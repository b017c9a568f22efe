//! CLI configuration file
//!
//! Holds defaults for the application id, key locations and validity window
//! so they need not be repeated on every invocation. The file is written by
//! hand; the CLI only reads it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "usersig";

/// Defaults applied when a flag is not given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Application id tokens are issued for
    #[serde(default)]
    pub sdk_appid: Option<String>,

    /// PEM private key used by `gen`
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,

    /// PEM public key used by `verify`
    #[serde(default)]
    pub public_key_path: Option<PathBuf>,

    /// Validity window in seconds
    #[serde(default)]
    pub expire_after: Option<u64>,
}

impl CliConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
        }
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Load from the default location
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.sdk_appid.is_none());
        assert!(config.private_key_path.is_none());
        assert!(config.public_key_path.is_none());
        assert!(config.expire_after.is_none());
    }

    #[test]
    fn test_partial_config_parses() {
        let config: CliConfig = serde_json::from_str(r#"{"sdk_appid": "1400000000"}"#).unwrap();
        assert_eq!(config.sdk_appid.as_deref(), Some("1400000000"));
        assert!(config.expire_after.is_none());
    }

    #[test]
    fn test_load_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = CliConfig {
            sdk_appid: Some("1400000000".to_string()),
            private_key_path: Some(PathBuf::from("/keys/private.pem")),
            public_key_path: Some(PathBuf::from("/keys/public.pem")),
            expire_after: Some(86400),
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(CliConfig::load_from(&path), config);
    }

    #[test]
    fn test_missing_or_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(CliConfig::load_from(&missing), CliConfig::default());

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, "not json").unwrap();
        assert_eq!(CliConfig::load_from(&invalid), CliConfig::default());
    }
}
