//! Configuration loading and archive root resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable consulted for the archive root
pub const ROOT_ENV_VAR: &str = "LECTERN_ROOT";

/// Optional TOML configuration file contents
///
/// All fields are optional; a missing or partial file never prevents
/// startup, it only removes one rung of the resolution ladder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Archive root directory override
    pub archive_root: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML configuration string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid config file: {}", e)))
    }
}

/// Archive root resolution priority order:
/// 1. Explicit argument from the host (highest priority)
/// 2. `LECTERN_ROOT` environment variable
/// 3. `archive_root` key in the TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_archive_root(explicit: Option<&str>) -> PathBuf {
    // Priority 1: Explicit argument
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(content) = std::fs::read_to_string(&config_path) {
            match TomlConfig::parse(&content) {
                Ok(config) => {
                    if let Some(root) = config.archive_root {
                        return PathBuf::from(root);
                    }
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed config {}: {}", config_path.display(), e);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_archive_root()
}

/// Get the configuration file path for the platform
fn find_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir()
        .map(|d| d.join("lectern").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if user_config.exists() {
        return Ok(user_config);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/lectern/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get the OS-dependent default archive root
pub fn default_archive_root() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lectern"))
        .unwrap_or_else(|| PathBuf::from("./lectern_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = TomlConfig::parse("archive_root = \"/srv/lectern\"").unwrap();
        assert_eq!(config.archive_root.as_deref(), Some("/srv/lectern"));
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();
        assert!(config.archive_root.is_none());
    }

    #[test]
    fn parse_malformed_config_is_an_error() {
        assert!(TomlConfig::parse("archive_root = [").is_err());
    }

    #[test]
    fn default_root_is_nonempty() {
        assert!(!default_archive_root().as_os_str().is_empty());
    }
}
