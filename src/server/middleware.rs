use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Access log line for every request
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start_time = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    let status = response.status();
    let content_length = response_size(&response);

    if status.is_server_error() {
        warn!(
            "{} {} -- {} (served in {:.3}ms; {} bytes)",
            method, path, status, elapsed_ms, content_length
        );
    } else {
        info!(
            "{} {} -- {} (served in {:.3}ms; {} bytes)",
            method, path, status, elapsed_ms, content_length
        );
    }

    response
}

fn response_size(response: &Response) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0)
}

/// CORS middleware setup
pub fn cors_layer() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::permissive()
}
