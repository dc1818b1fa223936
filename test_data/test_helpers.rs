//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    response::Response,
    Router,
};
use github_account_gateway::{
    client::GitHubGateway,
    config::GitHubConfig,
    security::SecureString,
    server::{create_app, AppState},
};
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_TOKEN: &str = "ghp_test_token";
pub const TEST_LOGIN: &str = "octocat";

/// Answer `GET /user` the way GitHub does for a valid token
pub fn mock_authenticated_user(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/user")
            .header("authorization".to_string(), format!("Bearer {TEST_TOKEN}"));
        then.status(200).json_body(json!({
            "login": TEST_LOGIN,
            "id": 583231,
            "type": "User"
        }));
    })
}

/// Repository document as returned by the repository endpoints
pub fn repository_json(name: &str) -> Value {
    json!({
        "id": 1296269,
        "name": name,
        "full_name": format!("{TEST_LOGIN}/{name}"),
        "private": true,
        "html_url": format!("https://github.com/{TEST_LOGIN}/{name}"),
        "clone_url": format!("https://github.com/{TEST_LOGIN}/{name}.git"),
    })
}

/// Open a real gateway session against the mock GitHub server
pub async fn connect_gateway(server: &MockServer) -> GitHubGateway {
    mock_authenticated_user(server);
    let config = GitHubConfig {
        api_url: server.base_url(),
        ..GitHubConfig::default()
    };
    GitHubGateway::connect(&config, SecureString::from(TEST_TOKEN))
        .await
        .expect("Failed to connect to mock GitHub")
}

/// Router wired to a real gateway that talks to the mock GitHub server
pub async fn build_app(server: &MockServer) -> Router {
    let gateway = connect_gateway(server).await;
    create_app(AppState::new(Arc::new(gateway)))
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
