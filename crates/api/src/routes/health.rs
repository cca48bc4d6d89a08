//! Health check endpoint.

/// GET /health — liveness probe.
pub async fn check() -> &'static str {
    "OK"
}
