use axum::{
    Router,
    routing::{get, post},
};

pub mod assets;
pub mod commands;
pub mod system;

/// Router for the editor page, its script, and the command endpoints.
///
/// A wrong method on a known path is answered like an unknown path.
pub fn router() -> Router {
    Router::new()
        .route("/", get(assets::index).fallback(system::fallback))
        .route("/index.html", get(assets::index).fallback(system::fallback))
        .route("/script.js", get(assets::script).fallback(system::fallback))
        .route(
            "/commandsSince/:marker",
            get(commands::commands_since).fallback(system::fallback),
        )
        .route("/postCommand", post(commands::post_command).fallback(system::fallback))
}
