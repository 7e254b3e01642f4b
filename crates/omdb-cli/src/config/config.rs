//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// OMDb API configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// API key sent as `apikey`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Base URL override (defaults to `http://www.omdbapi.com/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Resolves the API key: `env_key` wins over `api.key`.
    ///
    /// Empty values count as unset.
    pub fn resolve_api_key(&self, env_key: Option<String>) -> Option<String> {
        env_key
            .filter(|k| !k.is_empty())
            .or_else(|| self.api.key.clone().filter(|k| !k.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.api.key.is_none());
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_parse_api_section() {
        // Arrange
        let toml_str = "[api]\nkey = \"abc123\"\nbase_url = \"http://localhost:8080/\"\n";

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.api.key.as_deref(), Some("abc123"));
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://localhost:8080/")
        );
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            api: ApiConfig {
                key: Some(String::from("abc123")),
                base_url: None,
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nkey = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_env_key_overrides_config() {
        // Arrange
        let config = AppConfig {
            api: ApiConfig {
                key: Some(String::from("from-config")),
                base_url: None,
            },
        };

        // Act & Assert
        assert_eq!(
            config.resolve_api_key(Some(String::from("from-env"))),
            Some(String::from("from-env"))
        );
        assert_eq!(
            config.resolve_api_key(Some(String::new())),
            Some(String::from("from-config"))
        );
        assert_eq!(AppConfig::default().resolve_api_key(None), None);
    }
}
