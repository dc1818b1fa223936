use crate::client::AccountGateway;
use crate::error::{ApiError, GatewayError, ValidationError};
use crate::server::app::AppState;
use crate::workflow;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

fn default_private() -> bool {
    true
}

fn default_permission() -> String {
    "push".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateRepositoryRequest {
    pub name: String,
    #[serde(default = "default_private")]
    pub private: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct CollaboratorRequest {
    pub repo_name: String,
    pub collaborator: String,
    #[serde(default = "default_permission")]
    pub permission: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRequest {
    pub repo_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateRepositoryResponse {
    pub repo_url: String,
}

#[derive(Debug, Serialize)]
pub struct CloneUrlResponse {
    pub clone_url: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Routes backed by the gateway, used to pick the failure status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CreateRepository,
    CloneUrl,
    AddCollaborator,
    AddCodeqlWorkflow,
}

impl Route {
    /// Status code a gateway failure is reported with on this route
    pub fn failure_status(self, err: &GatewayError) -> StatusCode {
        match (self, err) {
            (
                Route::CloneUrl,
                GatewayError::NotFound { .. }
                | GatewayError::RemoteOperation { .. }
                | GatewayError::Transport(_),
            ) => StatusCode::NOT_FOUND,
            (
                Route::CreateRepository | Route::AddCollaborator | Route::AddCodeqlWorkflow,
                GatewayError::NotFound { .. }
                | GatewayError::RemoteOperation { .. }
                | GatewayError::Transport(_),
            ) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn reject(self, err: GatewayError) -> ApiError {
        let status = self.failure_status(&err);
        warn!("{:?} failed with {}: {}", self, status.as_u16(), err);
        ApiError::new(status, err.kind(), err.to_string())
    }
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(ValidationError::MalformedBody {
                message: rejection.body_text(),
            }
            .into())
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "github-account-gateway",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create a repository under the authenticated account
pub async fn create_repository(
    State(state): State<AppState>,
    payload: Result<Json<CreateRepositoryRequest>, JsonRejection>,
) -> Result<Json<CreateRepositoryResponse>, ApiError> {
    let request = parse_body(payload)?;

    if request.name.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "name" }.into());
    }

    let repository = state
        .gateway
        .create_repository(&request.name, request.private, &request.description)
        .await
        .map_err(|e| Route::CreateRepository.reject(e))?;

    Ok(Json(CreateRepositoryResponse {
        repo_url: repository.html_url,
    }))
}

/// Resolve the clone URL of a repository under the authenticated account
pub async fn clone_url(
    State(state): State<AppState>,
    Path(repo_name): Path<String>,
) -> Result<Json<CloneUrlResponse>, ApiError> {
    state.validator.validate_repository_name(&repo_name)?;

    let clone_url = state
        .gateway
        .resolve_clone_url(&repo_name)
        .await
        .map_err(|e| Route::CloneUrl.reject(e))?;

    Ok(Json(CloneUrlResponse { clone_url }))
}

/// Grant an account access to a repository
pub async fn add_collaborator(
    State(state): State<AppState>,
    payload: Result<Json<CollaboratorRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let request = parse_body(payload)?;

    state.validator.validate_repository_name(&request.repo_name)?;
    state.validator.validate_login(&request.collaborator)?;

    state
        .gateway
        .add_collaborator(&request.repo_name, &request.collaborator, &request.permission)
        .await
        .map_err(|e| Route::AddCollaborator.reject(e))?;

    Ok(Json(StatusResponse { status: "success" }))
}

/// Install or refresh the CodeQL workflow in a repository
pub async fn add_codeql_workflow(
    State(state): State<AppState>,
    payload: Result<Json<WorkflowRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let request = parse_body(payload)?;

    state.validator.validate_repository_name(&request.repo_name)?;

    let template = workflow::CODEQL;
    let outcome = state
        .gateway
        .upsert_file(
            &request.repo_name,
            template.path,
            template.content,
            template.commit_message,
        )
        .await
        .map_err(|e| Route::AddCodeqlWorkflow.reject(e))?;

    info!(
        "CodeQL workflow {:?} in {}",
        outcome,
        state.validator.sanitize_log_input(&request.repo_name)
    );

    Ok(Json(StatusResponse {
        status: "CodeQL workflow added",
    }))
}
