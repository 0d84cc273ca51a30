use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Middleware that logs HTTP requests at INFO level. Liveness probes are
/// skipped to keep the log readable.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    if path == "/health" || path == "/metrics" {
        return response;
    }

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "HTTP request"
    );

    response
}
