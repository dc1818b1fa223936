use crate::error::ConfigError;
use crate::security::InputValidator;
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;

/// Default GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub github: GitHubConfig,
}

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.github.validate()
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        match self.host.parse::<Ipv6Addr>() {
            Ok(_) => format!("[{}]:{}", self.host, self.port),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        InputValidator::default()
            .validate_host(&self.host)
            .map_err(|_| ConfigError::InvalidHost {
                host: self.host.clone(),
            })?;

        if self.port == 0 {
            return Err(ConfigError::InvalidPort { port: self.port });
        }

        Ok(())
    }
}

/// Upstream GitHub API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: String,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("github-account-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GitHubConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            message: e.to_string(),
        })?;

        InputValidator::default()
            .validate_scheme(url.scheme())
            .map_err(|e| ConfigError::InvalidApiUrl {
                url: self.api_url.clone(),
                message: e.to_string(),
            })?;

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "github.user_agent cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert!(config.github.user_agent.starts_with("github-account-gateway/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_config_validation() {
        let mut server = ServerConfig::default();
        assert!(server.validate().is_ok());

        server.port = 0;
        assert!(matches!(server.validate(), Err(ConfigError::InvalidPort { port: 0 })));

        server.port = 8000;
        server.host = "".to_string();
        assert!(matches!(server.validate(), Err(ConfigError::InvalidHost { .. })));
    }

    #[test]
    fn test_bind_address() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
        };
        assert_eq!(server.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_ipv6_host_is_accepted_and_bracketed() {
        let server = ServerConfig {
            host: "::".to_string(),
            port: 9000,
        };
        assert!(server.validate().is_ok());
        assert_eq!(server.bind_address(), "[::]:9000");
        assert!(server.bind_address().parse::<std::net::SocketAddr>().is_ok());
    }

    #[test]
    fn test_github_config_validation() {
        let mut github = GitHubConfig::default();
        assert!(github.validate().is_ok());

        github.api_url = "http://127.0.0.1:9999".to_string();
        assert!(github.validate().is_ok());

        github.api_url = "ftp://github.example.com".to_string();
        assert!(matches!(github.validate(), Err(ConfigError::InvalidApiUrl { .. })));

        github.api_url = "not a url".to_string();
        assert!(matches!(github.validate(), Err(ConfigError::InvalidApiUrl { .. })));

        github.api_url = DEFAULT_API_URL.to_string();
        github.user_agent = "  ".to_string();
        assert!(matches!(github.validate(), Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9100\n").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
    }
}
