use http::StatusCode;

/// Liveness probe; answers as long as the router is serving
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
