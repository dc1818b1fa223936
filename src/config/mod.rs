pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, TOKEN_ENV_VAR};
pub use types::{Config, GitHubConfig, ServerConfig};
