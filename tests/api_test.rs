#[path = "../test_data/test_helpers.rs"]
mod test_helpers;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine};
use github_account_gateway::{
    client::{AccountGateway, UpsertOutcome},
    error::GatewayError,
    server::{serve, AppState},
    workflow,
};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use test_helpers::*;
use tower::ServiceExt;

const WORKFLOW_PATH: &str = "/repos/octocat/demo/contents/.github/workflows/codeql.yml";

#[tokio::test]
async fn create_repo_returns_browsable_url() {
    let server = MockServer::start();
    let app = build_app(&server).await;

    let create = server.mock(|when, then| {
        when.method(POST).path("/user/repos").json_body(json!({
            "name": "demo",
            "private": true,
            "description": ""
        }));
        then.status(201).json_body(repository_json("demo"));
    });

    let response = app
        .oneshot(post_json(
            "/create-repo",
            json!({"name": "demo", "private": true, "description": ""}),
        ))
        .await
        .unwrap();

    create.assert();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let repo_url = body["repo_url"].as_str().unwrap();
    assert!(repo_url.ends_with("/demo"));
}

#[tokio::test]
async fn create_repo_with_taken_name_is_400() {
    let server = MockServer::start();
    let app = build_app(&server).await;

    server.mock(|when, then| {
        when.method(POST).path("/user/repos");
        then.status(422).json_body(json!({
            "message": "Repository creation failed.",
            "errors": [{
                "resource": "Repository",
                "code": "custom",
                "field": "name",
                "message": "name already exists on this account"
            }]
        }));
    });

    let response = app
        .oneshot(post_json("/create-repo", json!({"name": "demo"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("name already exists on this account"));
}

#[tokio::test]
async fn clone_url_after_creation() {
    let server = MockServer::start();
    let app = build_app(&server).await;

    server.mock(|when, then| {
        when.method(GET).path("/repos/octocat/demo");
        then.status(200).json_body(repository_json("demo"));
    });

    let response = app.oneshot(get("/clone-url/demo")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({"clone_url": "https://github.com/octocat/demo.git"})
    );
}

#[tokio::test]
async fn clone_url_for_missing_repository_is_404() {
    let server = MockServer::start();
    let gateway = connect_gateway(&server).await;

    server.mock(|when, then| {
        when.method(GET).path("/repos/octocat/missing");
        then.status(404).json_body(json!({"message": "Not Found"}));
    });

    assert!(matches!(
        gateway.resolve_clone_url("missing").await,
        Err(GatewayError::NotFound { .. })
    ));

    let app = github_account_gateway::server::create_app(AppState::new(Arc::new(gateway)));
    let response = app.oneshot(get("/clone-url/missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn add_collaborator_with_invalid_permission_is_not_defaulted() {
    let server = MockServer::start();
    let app = build_app(&server).await;

    let invite = server.mock(|when, then| {
        when.method(PUT)
            .path("/repos/octocat/demo/collaborators/hubot")
            .json_body(json!({"permission": "superuser"}));
        then.status(422).json_body(json!({
            "message": "Validation Failed",
            "errors": [{"resource": "Collaborator", "field": "permission", "code": "invalid"}]
        }));
    });

    let response = app
        .oneshot(post_json(
            "/add-collaborator",
            json!({"repo_name": "demo", "collaborator": "hubot", "permission": "superuser"}),
        ))
        .await
        .unwrap();

    invite.assert();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "remote_operation_failed");
}

#[tokio::test]
async fn add_collaborator_uses_push_by_default() {
    let server = MockServer::start();
    let app = build_app(&server).await;

    let invite = server.mock(|when, then| {
        when.method(PUT)
            .path("/repos/octocat/demo/collaborators/hubot")
            .json_body(json!({"permission": "push"}));
        then.status(201).json_body(json!({"id": 42}));
    });

    let response = app
        .oneshot(post_json(
            "/add-collaborator",
            json!({"repo_name": "demo", "collaborator": "hubot"}),
        ))
        .await
        .unwrap();

    invite.assert();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"status": "success"}));
}

#[tokio::test]
async fn codeql_workflow_is_created_then_updated_in_place() {
    let server = MockServer::start();
    let app = build_app(&server).await;
    let encoded = STANDARD.encode(workflow::CODEQL.content);

    let mut read = server.mock(|when, then| {
        when.method(GET).path(WORKFLOW_PATH);
        then.status(404).json_body(json!({"message": "Not Found"}));
    });
    let mut create = server.mock(|when, then| {
        when.method(PUT).path(WORKFLOW_PATH).json_body(json!({
            "message": "Add CodeQL workflow",
            "content": encoded.clone()
        }));
        then.status(201)
            .json_body(json!({"content": {"path": ".github/workflows/codeql.yml", "sha": "c0ffee"}}));
    });

    let response = app
        .clone()
        .oneshot(post_json("/add-codeql-workflow", json!({"repo_name": "demo"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({"status": "CodeQL workflow added"})
    );
    create.assert_hits(1);
    read.delete();
    create.delete();

    server.mock(|when, then| {
        when.method(GET).path(WORKFLOW_PATH);
        then.status(200).json_body(json!({
            "type": "file",
            "path": ".github/workflows/codeql.yml",
            "sha": "c0ffee"
        }));
    });
    let update = server.mock(|when, then| {
        when.method(PUT).path(WORKFLOW_PATH).json_body(json!({
            "message": "Add CodeQL workflow",
            "content": encoded.clone(),
            "sha": "c0ffee"
        }));
        then.status(200)
            .json_body(json!({"content": {"path": ".github/workflows/codeql.yml", "sha": "c0ffee"}}));
    });

    let response = app
        .oneshot(post_json("/add-codeql-workflow", json!({"repo_name": "demo"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    update.assert_hits(1);
}

#[tokio::test]
async fn upsert_is_idempotent_through_the_gateway() {
    let server = MockServer::start();
    let gateway = connect_gateway(&server).await;

    server.mock(|when, then| {
        when.method(GET).path(WORKFLOW_PATH);
        then.status(200).json_body(json!({"type": "file", "sha": "c0ffee"}));
    });
    let update = server.mock(|when, then| {
        when.method(PUT).path(WORKFLOW_PATH).json_body(json!({
            "message": "Add CodeQL workflow",
            "content": STANDARD.encode(workflow::CODEQL.content),
            "sha": "c0ffee"
        }));
        then.status(200).json_body(json!({"content": {"sha": "c0ffee"}}));
    });

    for _ in 0..2 {
        let outcome = gateway
            .upsert_file(
                "demo",
                workflow::CODEQL.path,
                workflow::CODEQL.content,
                workflow::CODEQL.commit_message,
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
    }
    update.assert_hits(2);
}

#[tokio::test]
async fn serves_over_a_real_socket() {
    let server = MockServer::start();
    let gateway = connect_gateway(&server).await;

    server.mock(|when, then| {
        when.method(GET).path("/repos/octocat/demo");
        then.status(200).json_body(repository_json("demo"));
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, AppState::new(Arc::new(gateway))));

    let body: serde_json::Value = reqwest::get(format!("http://{addr}/clone-url/demo"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["clone_url"], "https://github.com/octocat/demo.git");
}
