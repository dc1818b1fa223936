use crate::error::ValidationError;
use regex::Regex;
use std::collections::HashSet;
use std::net::IpAddr;

/// Validator for values that end up in GitHub API paths or server configuration
pub struct InputValidator {
    max_repository_length: usize,
    max_login_length: usize,
    max_host_length: usize,
    repository_pattern: Regex,
    hostname_pattern: Regex,
    allowed_schemes: HashSet<String>,
}

impl Default for InputValidator {
    fn default() -> Self {
        let mut allowed_schemes = HashSet::new();
        allowed_schemes.insert("https".to_string());
        allowed_schemes.insert("http".to_string());

        Self {
            max_repository_length: 100,
            max_login_length: 39,
            max_host_length: 253, // RFC 1035 limit
            repository_pattern: Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid repository regex"),
            hostname_pattern: Regex::new(
                r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
            )
            .expect("valid hostname regex"),
            allowed_schemes,
        }
    }
}

impl InputValidator {
    /// Validate a repository name that will be used as a path segment under the account
    pub fn validate_repository_name(&self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyField { field: "repo_name" });
        }

        if name.len() > self.max_repository_length {
            return Err(ValidationError::InvalidField {
                field: "repo_name",
                message: format!("repository name too long: {} characters", name.len()),
            });
        }

        if name == "." || name == ".." {
            return Err(ValidationError::InvalidField {
                field: "repo_name",
                message: "repository name cannot be a relative path".to_string(),
            });
        }

        if !self.repository_pattern.is_match(name) {
            return Err(ValidationError::InvalidField {
                field: "repo_name",
                message: format!(
                    "invalid characters in repository name: {}",
                    self.sanitize_log_input(name)
                ),
            });
        }

        Ok(())
    }

    /// Validate an account login used as a path segment.
    ///
    /// Only path safety is checked here; GitHub decides whether the account exists.
    pub fn validate_login(&self, login: &str) -> Result<(), ValidationError> {
        if login.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "collaborator",
            });
        }

        if login.len() > self.max_login_length {
            return Err(ValidationError::InvalidField {
                field: "collaborator",
                message: format!("login too long: {} characters", login.len()),
            });
        }

        if login == "." || login == ".." || login.chars().any(|c| c == '/' || c.is_control()) {
            return Err(ValidationError::InvalidField {
                field: "collaborator",
                message: format!("invalid login: {}", self.sanitize_log_input(login)),
            });
        }

        Ok(())
    }

    /// Validate host/domain name
    pub fn validate_host(&self, host: &str) -> Result<(), ValidationError> {
        if host.is_empty() {
            return Err(ValidationError::EmptyField { field: "host" });
        }

        if host.len() > self.max_host_length {
            return Err(ValidationError::InvalidField {
                field: "host",
                message: format!("host name too long: {} characters", host.len()),
            });
        }

        if host.parse::<IpAddr>().is_ok() {
            return Ok(());
        }

        if !self.hostname_pattern.is_match(host) {
            return Err(ValidationError::InvalidField {
                field: "host",
                message: "invalid host name format".to_string(),
            });
        }

        Ok(())
    }

    /// Validate URL scheme
    pub fn validate_scheme(&self, scheme: &str) -> Result<(), ValidationError> {
        if !self.allowed_schemes.contains(scheme) {
            return Err(ValidationError::InvalidField {
                field: "scheme",
                message: format!("scheme '{}' is not allowed", scheme),
            });
        }

        Ok(())
    }

    /// Strip control characters from user input before it reaches the logs
    pub fn sanitize_log_input(&self, input: &str) -> String {
        input
            .chars()
            .filter(|c| c.is_ascii() && !c.is_control() || *c == ' ')
            .take(256)
            .collect()
    }
}
