//! Command submission and since-marker polling.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::Extension,
    http::{HeaderMap, StatusCode, Uri, header},
    response::IntoResponse,
};
use http_body_util::LengthLimitError;

use editrelay_core::{RelayError, RelayResult};

use crate::app::{dto::CommandsResponse, errors, services::AppServices};

/// GET /commandsSince/:marker
///
/// Every retained command with an id strictly greater than `marker`,
/// ascending. A non-numeric marker is a 404.
///
/// The marker is taken from the raw request path, so percent-encoded digits
/// and query strings are rejected too.
pub async fn commands_since(
    Extension(services): Extension<Arc<AppServices>>,
    uri: Uri,
) -> axum::response::Response {
    match raw_marker(&uri).and_then(|marker| services.sync.poll(marker)) {
        Ok(commands) => (StatusCode::OK, Json(CommandsResponse { commands })).into_response(),
        Err(e) => {
            tracing::debug!(%uri, "rejected poll: {e}");
            errors::relay_error_to_response(e)
        }
    }
}

/// Last path segment of `uri`, undecoded. Any query string is an error.
pub fn raw_marker(uri: &Uri) -> RelayResult<&str> {
    if uri.query().is_some() {
        return Err(RelayError::invalid_marker("query strings are not accepted"));
    }
    let path = uri.path();
    Ok(path.rsplit_once('/').map_or(path, |(_, last)| last))
}

/// POST /postCommand
///
/// Body is a JSON document of at most the configured size, announced via
/// `Content-Length`. The size is checked before the body is read.
pub async fn post_command(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    body: Body,
) -> axum::response::Response {
    match accept_command(&services, &headers, body).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::info!("rejected command: {e}");
            errors::relay_error_to_response(e)
        }
    }
}

async fn accept_command(services: &AppServices, headers: &HeaderMap, body: Body) -> RelayResult<()> {
    let declared = declared_length(headers)?;
    services.sync.check_size(declared)?;

    let limit = usize::try_from(services.sync.max_payload_bytes()).unwrap_or(usize::MAX);
    let raw = axum::body::to_bytes(body, limit).await.map_err(|e| {
        let e = e.into_inner();
        if e.is::<LengthLimitError>() {
            // Only known to be past the limit.
            RelayError::PayloadTooLarge {
                declared: services.sync.max_payload_bytes().saturating_add(1),
                limit: services.sync.max_payload_bytes(),
            }
        } else {
            RelayError::invalid_length(format!("failed to read body: {e}"))
        }
    })?;

    services.sync.submit(&raw, declared)?;
    Ok(())
}

/// Parse the `Content-Length` header as a non-negative integer.
pub fn declared_length(headers: &HeaderMap) -> RelayResult<u64> {
    let value = headers
        .get(header::CONTENT_LENGTH)
        .ok_or(RelayError::MissingLength)?;

    let value = value
        .to_str()
        .map_err(|_| RelayError::invalid_length("Content-Length must be a number"))?;

    value
        .trim()
        .parse::<u64>()
        .map_err(|_| RelayError::invalid_length("Content-Length must be a number"))
}
