use crate::client::gateway::{AccountGateway, UpsertOutcome};
use crate::client::types::{
    ApiErrorBody, CollaboratorBody, ContentsResponse, CreateRepositoryBody, GitHubUser,
    PutContentsBody, Repository,
};
use crate::config::GitHubConfig;
use crate::error::GatewayError;
use crate::security::SecureString;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, info, warn};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Authenticated session against the GitHub REST API for one account
pub struct GitHubGateway {
    base_url: String,
    login: String,
    token: SecureString,
    client: Client,
}

impl GitHubGateway {
    /// Open a session and resolve the login of the token's owner
    pub async fn connect(config: &GitHubConfig, token: SecureString) -> Result<Self, GatewayError> {
        let mut gateway = Self::with_login(config, token, String::new())?;

        let url = format!("{}/user", gateway.base_url);
        let response = gateway.send(gateway.request(Method::GET, &url)).await?;
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let user: GitHubUser = response.json().await?;
        info!("Authenticated to GitHub as {}", user.login);
        gateway.login = user.login;

        Ok(gateway)
    }

    /// Build a session for an already known login without calling the API
    pub fn with_login(
        config: &GitHubConfig,
        token: SecureString,
        login: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            login: login.into(),
            token,
            client,
        })
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(self.token.as_str())
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = builder.send().await.map_err(|e| {
            warn!("Request to GitHub failed: {}", e);
            GatewayError::Transport(e)
        })?;
        debug!("GitHub answered {} for {}", response.status(), response.url());
        Ok(response)
    }

    /// `{base}/repos/{login}/{repo}` followed by `suffix`
    fn repo_url(&self, repo_name: &str, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.base_url,
            urlencoding::encode(&self.login),
            urlencoding::encode(repo_name),
            suffix
        )
    }

    fn contents_url(&self, repo_name: &str, path: &str) -> String {
        let encoded: Vec<_> = path
            .trim_matches('/')
            .split('/')
            .map(urlencoding::encode)
            .collect();
        self.repo_url(repo_name, &format!("/contents/{}", encoded.join("/")))
    }

    /// Turn a non-success response into a remote operation failure
    async fn remote_error(response: Response) -> GatewayError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.describe())
            .unwrap_or_else(|_| text.trim().to_string());
        let message = if message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            message
        };

        warn!("GitHub API error response: {} {}", status.as_u16(), message);
        GatewayError::remote(status.as_u16(), message)
    }

    /// Current blob sha of `path`, or `None` when GitHub reports it absent
    async fn fetch_file_sha(
        &self,
        repo_name: &str,
        path: &str,
    ) -> Result<Option<String>, GatewayError> {
        let url = self.contents_url(repo_name, path);
        let response = self.send(self.request(Method::GET, &url)).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{} does not exist in {}/{}", path, self.login, repo_name);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::remote_error(response).await);
        }

        match response.json::<ContentsResponse>().await? {
            ContentsResponse::File(file) if file.kind == "file" => Ok(Some(file.sha)),
            ContentsResponse::File(file) => Err(GatewayError::remote(
                status.as_u16(),
                format!("{} is a {}, not a file", path, file.kind),
            )),
            ContentsResponse::Directory(_) => Err(GatewayError::remote(
                status.as_u16(),
                format!("{} is a directory, not a file", path),
            )),
        }
    }
}

#[async_trait]
impl AccountGateway for GitHubGateway {
    async fn create_repository(
        &self,
        name: &str,
        private: bool,
        description: &str,
    ) -> Result<Repository, GatewayError> {
        let url = format!("{}/user/repos", self.base_url);
        let body = CreateRepositoryBody {
            name,
            private,
            description,
        };

        let response = self
            .send(self.request(Method::POST, &url).json(&body))
            .await?;
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let repository: Repository = response.json().await?;
        info!("Created repository {}", repository.full_name);
        Ok(repository)
    }

    async fn resolve_clone_url(&self, repo_name: &str) -> Result<String, GatewayError> {
        let url = self.repo_url(repo_name, "");
        let response = self.send(self.request(Method::GET, &url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::not_found(format!(
                "repository {}/{}",
                self.login, repo_name
            )));
        }
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let repository: Repository = response.json().await?;
        Ok(repository.clone_url)
    }

    async fn add_collaborator(
        &self,
        repo_name: &str,
        collaborator: &str,
        permission: &str,
    ) -> Result<(), GatewayError> {
        let url = self.repo_url(
            repo_name,
            &format!("/collaborators/{}", urlencoding::encode(collaborator)),
        );
        let body = CollaboratorBody { permission };

        let response = self
            .send(self.request(Method::PUT, &url).json(&body))
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                info!(
                    "Invited {} to {}/{} with {} permission",
                    collaborator, self.login, repo_name, permission
                );
                Ok(())
            }
            status if status.is_success() => {
                info!(
                    "{} already collaborates on {}/{}, permission set to {}",
                    collaborator, self.login, repo_name, permission
                );
                Ok(())
            }
            _ => Err(Self::remote_error(response).await),
        }
    }

    async fn upsert_file(
        &self,
        repo_name: &str,
        path: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<UpsertOutcome, GatewayError> {
        let existing = self.fetch_file_sha(repo_name, path).await?;

        let url = self.contents_url(repo_name, path);
        let body = PutContentsBody {
            message: commit_message,
            content: STANDARD.encode(content),
            sha: existing.as_deref(),
        };

        let response = self
            .send(self.request(Method::PUT, &url).json(&body))
            .await?;
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let outcome = match existing {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Created,
        };
        info!("{:?} {} in {}/{}", outcome, path, self.login, repo_name);
        Ok(outcome)
    }
}
