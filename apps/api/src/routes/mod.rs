pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::quotes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Quote board API
        .route("/api/v1/board", get(handlers::handle_get_board))
        .route("/api/v1/topic", put(handlers::handle_set_topic))
        .route("/api/v1/generate", post(handlers::handle_generate))
        .route("/api/v1/reset", post(handlers::handle_reset))
        .route(
            "/api/v1/notice/dismiss",
            post(handlers::handle_dismiss_notice),
        )
        .with_state(state)
}
