//! Logging middleware

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Request logging middleware.
///
/// Logs the matched route template alongside the concrete path so events
/// and categories in the URL stay searchable per route.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| path.clone());

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if status.is_server_error() {
        warn!(
            method = %method,
            route = %route,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(
            method = %method,
            route = %route,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request rejected"
        );
    } else if route.ends_with("/health") {
        debug!(status = status.as_u16(), duration_ms = %duration_ms, "Health check");
    } else {
        info!(
            method = %method,
            route = %route,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    response
}
