use axum::{extract::State, http::StatusCode, Json};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};
use tracing::{info, instrument, warn};

use super::{
    dto::{CreateMoodRequest, MoodListResponse, MoodResponse, MoodStatsResponse},
    repo, stats,
};
use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn today_utc() -> Result<String, ApiError> {
    let formatted = OffsetDateTime::now_utc()
        .date()
        .format(DATE_FORMAT)
        .map_err(anyhow::Error::from)?;
    Ok(formatted)
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list_moods(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<MoodListResponse>, ApiError> {
    let moods = repo::list_by_user(state.store.as_ref(), &user.0.id).await?;
    Ok(Json(MoodListResponse { moods }))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.0.id))]
pub async fn create_mood(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateMoodRequest>,
) -> Result<(StatusCode, Json<MoodResponse>), ApiError> {
    let emoji = payload.emoji.filter(|e| !e.is_empty());
    // A zero rating reads as "no rating", like the empty string for emoji.
    let rating = payload.rating.filter(|r| *r != 0.0);
    if emoji.is_none() && rating.is_none() {
        warn!("mood without emoji or rating");
        return Err(ApiError::validation("Either emoji or rating is required"));
    }
    if let Some(rating) = rating {
        if !(1.0..=10.0).contains(&rating) {
            warn!(rating, "mood rating out of range");
            return Err(ApiError::validation("Rating must be between 1 and 10"));
        }
    }

    let date = match payload.date.filter(|d| !d.is_empty()) {
        Some(date) => date,
        None => today_utc()?,
    };

    let mood = repo::create(
        state.store.as_ref(),
        &user.0.id,
        emoji,
        rating,
        payload.note.unwrap_or_default(),
        date,
    )
    .await?;

    info!(mood_id = %mood.id, "mood logged");
    Ok((
        StatusCode::CREATED,
        Json(MoodResponse {
            message: "Mood logged successfully".into(),
            mood,
        }),
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn mood_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<MoodStatsResponse>, ApiError> {
    let moods = repo::list_by_user(state.store.as_ref(), &user.0.id).await?;
    let stats = stats::compute(&moods, OffsetDateTime::now_utc());
    Ok(Json(MoodStatsResponse { stats }))
}
