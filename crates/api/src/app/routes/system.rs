use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{Method, StatusCode},
};

use crate::app::{dto::HealthResponse, errors, services::AppServices};

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> Json<HealthResponse> {
    let log = services.sync.log();
    Json(HealthResponse {
        status: "ok",
        commands: log.len(),
        capacity: log.capacity(),
        last_id: log.last_id(),
        oldest_id: log.oldest_id(),
    })
}

/// Unknown POST paths are a bad request; anything else is not found.
pub async fn fallback(method: Method) -> axum::response::Response {
    if method == Method::POST {
        errors::json_error(StatusCode::BAD_REQUEST, "unknown_request", "Unknown request.")
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "Invalid path")
    }
}
