use crate::client::types::Repository;
use crate::error::GatewayError;
use async_trait::async_trait;

/// Which branch an upsert took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Operations issued against the hosted account on behalf of HTTP callers.
///
/// Implementations hold one authenticated session and must be safe to share
/// between concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Create a repository owned by the authenticated account
    async fn create_repository(
        &self,
        name: &str,
        private: bool,
        description: &str,
    ) -> Result<Repository, GatewayError>;

    /// Look up a repository under the account and return its clone URL.
    ///
    /// A missing repository is reported as [`GatewayError::NotFound`].
    async fn resolve_clone_url(&self, repo_name: &str) -> Result<String, GatewayError>;

    /// Invite `collaborator` or change their permission on `repo_name`.
    ///
    /// `permission` is passed through untouched; an unknown value is rejected
    /// by the remote service.
    async fn add_collaborator(
        &self,
        repo_name: &str,
        collaborator: &str,
        permission: &str,
    ) -> Result<(), GatewayError>;

    /// Write `content` to `path`, updating the file in place when it exists
    /// and creating it when it does not.
    async fn upsert_file(
        &self,
        repo_name: &str,
        path: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<UpsertOutcome, GatewayError>;
}
