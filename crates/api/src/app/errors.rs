use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use editrelay_core::RelayError;

pub fn relay_error_to_response(err: RelayError) -> axum::response::Response {
    match err {
        RelayError::MissingLength => json_error(
            StatusCode::BAD_REQUEST,
            "missing_length",
            "Content-Length must be provided",
        ),
        RelayError::InvalidLength(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_length", msg),
        e @ RelayError::PayloadTooLarge { .. } => {
            json_error(StatusCode::BAD_REQUEST, "payload_too_large", e.to_string())
        }
        RelayError::MalformedPayload(msg) => {
            json_error(StatusCode::BAD_REQUEST, "malformed_payload", msg)
        }
        RelayError::InvalidMarker(msg) => json_error(StatusCode::NOT_FOUND, "invalid_marker", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
