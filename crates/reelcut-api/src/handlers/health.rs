//! Health probe.

use axum::response::Response;

use crate::response;

/// GET /health
pub async fn health() -> Response {
    response::message("ok")
}
