pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod moods;
pub mod quotes;
pub mod state;
pub mod store;
pub mod tasks;
