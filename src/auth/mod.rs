use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(handlers::signup))
        .route("/users/login", post(handlers::login))
        .route("/users/me", get(handlers::me))
}
