//! Application configuration
//!
//! Manages user settings including:
//! - Temp location used while renumbering
//! - Digest used to verify copies
//! - Output color and default log level
//!
//! Settings are read from a JSON file once at startup and passed down;
//! command-line flags override them.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ChecksumKind;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root for renumber staging; the OS temp directory when unset
    pub temp_dir: Option<PathBuf>,
    /// Digest compared after each copied file
    pub checksum: ChecksumKind,
    /// Color offline files in expand output
    pub color: bool,
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            checksum: ChecksumKind::Md5,
            color: true,
            log_level: "warn".to_string(),
        }
    }
}

/// Default config file location: <config dir>/fileseq/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fileseq").join("config.json"))
}

/// Parse configuration from JSON text
pub fn parse_config(text: &str) -> Result<AppConfig, String> {
    serde_json::from_str(text).map_err(|e| format!("Invalid config: {}", e))
}

/// Load configuration
///
/// An explicit path must exist. Without one the default location is tried
/// and a missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, String> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => {
                debug!("No config directory available, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    if !path.exists() {
        if required {
            return Err(format!("Config file not found: {}", path.display()));
        }
        debug!("No config at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let text = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    let config = parse_config(&text).map_err(|e| format!("{} ({})", e, path.display()))?;

    info!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.checksum, ChecksumKind::Md5);
        assert!(config.color);
        assert!(config.temp_dir.is_none());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(r#"{"checksum": "sha256", "temp_dir": "/scratch"}"#).unwrap();
        assert_eq!(config.checksum, ChecksumKind::Sha256);
        assert_eq!(config.temp_dir, Some(PathBuf::from("/scratch")));
        assert!(config.color);
    }

    #[test]
    fn test_parse_rejects_unknown_checksum() {
        assert!(parse_config(r#"{"checksum": "crc32"}"#).is_err());
    }

    #[test]
    fn test_load_explicit_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("config.json"))).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"color": false, "log_level": "debug"}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.color);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
