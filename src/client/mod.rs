//! Remote account gateway: the GitHub side of every HTTP route.

pub mod api;
pub mod gateway;
pub mod types;

pub use api::GitHubGateway;
pub use gateway::{AccountGateway, UpsertOutcome};
pub use types::Repository;

#[cfg(test)]
pub use gateway::MockAccountGateway;
