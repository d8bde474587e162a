use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Logs one line per request. Health checks are logged at debug level
/// so they don't drown out scrape requests.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if uri.path() == "/api/health" {
        tracing::debug!(method = %method, uri = %uri, status = %status, duration_ms, "Request processed");
    } else if status.is_server_error() {
        tracing::warn!(method = %method, uri = %uri, status = %status, duration_ms, "Request failed");
    } else {
        tracing::info!(method = %method, uri = %uri, status = %status, duration_ms, "Request processed");
    }

    response
}
