use crate::client::AccountGateway;
use crate::security::InputValidator;
use crate::server::handlers::{
    add_codeql_workflow, add_collaborator, clone_url, create_repository, health_check,
};
use crate::server::middleware::{cors_layer, logging_middleware};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn AccountGateway>,
    pub validator: Arc<InputValidator>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn AccountGateway>) -> Self {
        Self {
            gateway,
            validator: Arc::new(InputValidator::default()),
        }
    }
}

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(middleware::from_fn(logging_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/create-repo", post(create_repository))
        .route("/clone-url/{repo_name}", get(clone_url))
        .route("/add-collaborator", post(add_collaborator))
        .route("/add-codeql-workflow", post(add_codeql_workflow))
        .layer(middleware_stack)
        .with_state(state)
}
