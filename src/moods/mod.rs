use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod stats;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/moods", get(handlers::list_moods).post(handlers::create_mood))
        .route("/moods/stats", get(handlers::mood_stats))
}
