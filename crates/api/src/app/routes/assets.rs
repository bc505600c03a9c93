//! Static editor page and script bundle.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};

use crate::app::{errors, services::AppServices};

/// Page shell; the editor itself lives in `script.js`.
pub const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// GET / and GET /index.html
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /script.js
///
/// Read from disk on every request so a rebuilt bundle is picked up without
/// a restart.
pub async fn script(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match tokio::fs::read(&services.script_path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/javascript")],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %services.script_path.display(), "script bundle not found");
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "script bundle not found")
        }
        Err(e) => {
            tracing::error!(path = %services.script_path.display(), "failed to read script bundle: {e}");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "asset_error",
                "failed to read script bundle",
            )
        }
    }
}
