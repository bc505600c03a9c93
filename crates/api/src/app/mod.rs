//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the sync service in front of the command log
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use editrelay_infra::command_log::CommandLog;

use crate::config::RelayConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with a fresh command log (used by `main.rs`).
pub fn build_app(config: &RelayConfig) -> Router {
    wire(services::build_services(config))
}

/// Build the router around an existing command log.
pub fn build_app_with_log(config: &RelayConfig, log: Arc<dyn CommandLog>) -> Router {
    wire(services::build_services_with_log(config, log))
}

fn wire(services: services::AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route(
            "/health",
            get(routes::system::health).fallback(routes::system::fallback),
        )
        .merge(routes::router())
        .fallback(routes::system::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(services)),
        )
}
