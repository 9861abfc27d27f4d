//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the liveness probe, the session REST API, and the websocket relay
//! endpoint under a single Axum router. CORS is permissive: the canvas
//! frontend is served separately and there is no authentication surface.

pub mod sessions;
pub mod ws;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/sessions/save", post(sessions::save_session))
        .route("/api/sessions/{room_id}", get(sessions::load_session))
        .route("/ws", get(ws::handle_ws))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn root() -> &'static str {
    "Backend is running"
}
