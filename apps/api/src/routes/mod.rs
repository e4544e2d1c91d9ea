pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::interview::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/interview/questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/interview/respond",
            post(handlers::handle_conversation_turn),
        )
        .route(
            "/api/v1/interview/feedback",
            post(handlers::handle_generate_feedback),
        )
        .fallback(not_found)
        .with_state(state)
}
