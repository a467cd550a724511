use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/tracker", get(handlers::get_tracker))
        .route("/api/items", post(handlers::create_item))
        .route("/api/items/:id", delete(handlers::delete_item))
        .route("/api/progress/toggle", post(handlers::toggle))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/levels", get(handlers::get_levels))
        .route("/api/export", get(handlers::export))
        .route("/api/import", post(handlers::import))
        .route("/api/goals", get(handlers::get_goals))
        .route("/api/goals/size", put(handlers::resize_goals))
        .route(
            "/api/goals/:index",
            put(handlers::edit_goal).delete(handlers::clear_goal),
        )
        .route("/api/goals/:index/toggle", post(handlers::toggle_goal))
        .route("/api/books", get(handlers::list_books).post(handlers::create_book))
        .route(
            "/api/books/:id",
            put(handlers::update_book).delete(handlers::delete_book),
        )
        .with_state(state)
}
