use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/quotes",
            get(handlers::list_quotes).post(handlers::create_quote),
        )
        .route("/quotes/random", get(handlers::random_quote))
}
