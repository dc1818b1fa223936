use axum::http::StatusCode;
use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("github error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Failures surfaced by the remote account gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("github returned {status}: {message}")]
    RemoteOperation { status: u16, message: String },

    #[error("request to github failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        GatewayError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        GatewayError::RemoteOperation {
            status,
            message: message.into(),
        }
    }

    /// Short machine-readable kind used in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::NotFound { .. } => "not_found",
            GatewayError::RemoteOperation { .. } => "remote_operation_failed",
            GatewayError::Transport(_) => "remote_unreachable",
        }
    }
}

/// Request input rejected before any remote call
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid request body: {message}")]
    MalformedBody { message: String },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid {field}: {message}")]
    InvalidField { field: &'static str, message: String },
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("invalid toml format: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("environment variable {name} is not set")]
    MissingToken { name: &'static str },

    #[error("invalid port number: {port}")]
    InvalidPort { port: u16 },

    #[error("invalid host: {host}")]
    InvalidHost { host: String },

    #[error("invalid github api url {url}: {message}")]
    InvalidApiUrl { url: String, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },
}

/// Server-specific errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server startup failed: {0}")]
    StartupError(String),
}

/// Convenience type for Results
pub type Result<T> = std::result::Result<T, AppError>;

/// Error returned to HTTP callers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_failed",
            err.to_string(),
        )
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use serde_json::json;

        let body = Json(json!({
            "error": self.kind,
            "message": self.message,
        }));

        (self.status, body).into_response()
    }
}
