pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::letters::handlers;
use crate::recommendations::handlers::handle_recommendations;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such endpoint".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Cover letters
        .route("/api/v1/cover-letters", post(handlers::handle_generate))
        .route("/api/v1/cover-letters/revise", post(handlers::handle_revise))
        // Recommendations
        .route("/api/v1/recommendations", post(handle_recommendations))
        .fallback(not_found)
        .with_state(state)
}
