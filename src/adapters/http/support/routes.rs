//! Axum router configuration for support endpoints.

use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use super::handlers::{
    clear_memory, delete_user_data, get_mood_statistics, get_profile, health, submit_turn,
    SupportAppState,
};

/// Create the support API router.
///
/// # Routes
/// - `POST /sessions/:session_id/turns` - Process one user message
/// - `GET /sessions/:session_id/profile?user_id=` - Session profile summary
/// - `DELETE /sessions/:session_id/memory?user_id=` - Clear memory and emotion history
/// - `GET /users/:user_id/mood` - Mood statistics
/// - `DELETE /users/:user_id` - Delete persisted data
/// - `GET /health` - Liveness check
pub fn support_routes() -> Router<SupportAppState> {
    Router::new()
        .route("/sessions/:session_id/turns", post(submit_turn))
        .route("/sessions/:session_id/profile", get(get_profile))
        .route("/sessions/:session_id/memory", delete(clear_memory))
        .route("/users/:user_id/mood", get(get_mood_statistics))
        .route("/users/:user_id", delete(delete_user_data))
        .route("/health", get(health))
}

/// Full application router: routes nested under `/api/support` with
/// tracing, CORS, and request timeout layers.
pub fn support_router(state: SupportAppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api/support", support_routes())
        .with_state(state)
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
