use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/week", get(handlers::get_week))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/undo", post(handlers::undo))
        .route("/api/pattern", get(handlers::get_pattern).post(handlers::set_pattern))
        .with_state(state)
}
