use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/tasks/:id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
}
