use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/habits", post(handlers::create_habit))
        .route(
            "/api/habits/:habit_id",
            put(handlers::update_habit).delete(handlers::delete_habit),
        )
        .route("/api/habits/:habit_id/toggle", post(handlers::toggle_completion))
        .with_state(state)
}
