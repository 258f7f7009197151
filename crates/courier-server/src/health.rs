use http::StatusCode;

/// Liveness check, answers without touching the provider
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
