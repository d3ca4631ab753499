use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/activities", get(handlers::get_activities))
        .route("/api/activities/suggest", get(handlers::get_suggestion))
        .route("/api/activities/done", post(handlers::mark_done))
        .route("/api/activities/history", get(handlers::get_history))
        .route("/api/activities/cancelLast", put(handlers::cancel_last))
        .route("/api/current-statistics", get(handlers::get_current_statistics))
        .route("/api/statistics", get(handlers::get_statistics))
        .with_state(state)
}
