use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{error, info, warn};

/// Logs every request with its status and latency; 5xx responses at error level.
pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        error!("{} {} -> {} ({} ms)", method, path, status, elapsed_ms);
    } else if status.is_client_error() {
        warn!("{} {} -> {} ({} ms)", method, path, status, elapsed_ms);
    } else {
        info!("{} {} -> {} ({} ms)", method, path, status, elapsed_ms);
    }

    response
}
