use crate::config::types::Config;
use crate::error::ConfigError;
use crate::security::SecureString;
use std::fs;
use tracing::{info, warn};

/// Environment variable holding the GitHub token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file with basic sanity checks
    pub fn from_file(path: &str) -> Result<Config, ConfigError> {
        Self::validate_config_path(path)?;

        let content = fs::read_to_string(path).map_err(|e| {
            warn!("Failed to read config file {}: {}", path, e);
            ConfigError::FileReadError(e)
        })?;

        Self::validate_config_content(&content)?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            warn!("Failed to parse TOML in {}: {}", path, e);
            ConfigError::TomlParseError(e)
        })?;

        info!("Configuration loaded successfully from {}", path);
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load(path: Option<&str>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                info!("No configuration file given, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Read the GitHub token from the environment
    pub fn token_from_env() -> Result<SecureString, ConfigError> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => Ok(SecureString::new(value)),
            _ => Err(ConfigError::MissingToken {
                name: TOKEN_ENV_VAR,
            }),
        }
    }

    fn validate_config_path(path: &str) -> Result<(), ConfigError> {
        if path.contains('\0') || path.chars().any(|c| c.is_control()) {
            warn!("Configuration path contains invalid characters");
            return Err(ConfigError::ValidationError {
                message: "configuration path contains invalid characters".to_string(),
            });
        }

        if path.len() > 1024 {
            warn!("Configuration path too long: {} characters", path.len());
            return Err(ConfigError::ValidationError {
                message: format!("configuration path too long: {} characters", path.len()),
            });
        }

        Ok(())
    }

    fn validate_config_content(content: &str) -> Result<(), ConfigError> {
        // 1MB is far beyond anything this file needs
        if content.len() > 1024 * 1024 {
            warn!("Configuration file too large: {} bytes", content.len());
            return Err(ConfigError::ValidationError {
                message: format!("configuration file too large: {} bytes", content.len()),
            });
        }

        if content.contains('\0') {
            warn!("Configuration file contains binary data");
            return Err(ConfigError::ValidationError {
                message: "configuration file appears to contain binary data".to_string(),
            });
        }

        // Tokens belong in the environment, never on disk
        if content.lines().any(|line| {
            let line = line.trim_start().to_lowercase();
            line.starts_with("token") || line.starts_with("github_token")
        }) {
            warn!("Configuration file appears to contain a token");
            return Err(ConfigError::ValidationError {
                message: format!(
                    "tokens are not read from the configuration file, set {} instead",
                    TOKEN_ENV_VAR
                ),
            });
        }

        Ok(())
    }
}
