use std::net::SocketAddr;

use axum::{extract::DefaultBodyLimit, extract::State, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, moods, quotes, tasks};

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_app(state: AppState) -> Router {
    let sanitizer = middleware::from_fn_with_state(state.clone(), crate::error::sanitize_server_errors);
    Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .route("/", get(api_root))
                .route("/health", get(api_health))
                .merge(auth::router())
                .merge(tasks::router())
                .merge(moods::router())
                .merge(quotes::router()),
        )
        .with_state(state)
        .layer(sanitizer)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": now_rfc3339(),
        "environment": state.config.environment,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn api_health() -> Json<Value> {
    Json(json!({ "status": "OK", "timestamp": now_rfc3339() }))
}

async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "Mindful Day API is running!",
        "timestamp": now_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
