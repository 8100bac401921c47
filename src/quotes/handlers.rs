use axum::{extract::State, http::StatusCode, Json};
use rand::seq::SliceRandom;
use tracing::{info, instrument, warn};

use super::{
    dto::{CreateQuoteRequest, QuoteListResponse, QuoteResponse, SingleQuoteResponse},
    repo,
};
use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

const MAX_QUOTE_LEN: usize = 500;

/// Public. The list is shuffled on every call; ordering is explicitly
/// not stable across requests.
#[instrument(skip(state))]
pub async fn list_quotes(
    State(state): State<AppState>,
) -> Result<Json<QuoteListResponse>, ApiError> {
    let mut quotes = repo::list_all(state.store.as_ref()).await?;
    quotes.shuffle(&mut rand::thread_rng());
    Ok(Json(QuoteListResponse { quotes }))
}

/// Public.
#[instrument(skip(state))]
pub async fn random_quote(
    State(state): State<AppState>,
) -> Result<Json<SingleQuoteResponse>, ApiError> {
    let quotes = repo::list_all(state.store.as_ref()).await?;
    let quote = quotes
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| ApiError::not_found("No quotes available"))?;
    Ok(Json(SingleQuoteResponse { quote }))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.0.id))]
pub async fn create_quote(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteResponse>), ApiError> {
    let text = payload
        .text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let Some(text) = text else {
        warn!("quote without text");
        return Err(ApiError::validation("Quote text is required"));
    };

    if text.chars().count() > MAX_QUOTE_LEN {
        warn!(len = text.chars().count(), "quote text too long");
        return Err(ApiError::validation(
            "Quote text must be less than 500 characters",
        ));
    }

    let author = payload
        .author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| "Anonymous".into());

    let quote = repo::create(state.store.as_ref(), text, author, &user.0.id, &user.0.name).await?;

    info!(quote_id = %quote.id, "quote added");
    Ok((
        StatusCode::CREATED,
        Json(QuoteResponse {
            message: "Quote added successfully".into(),
            quote,
        }),
    ))
}
