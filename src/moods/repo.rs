use time::OffsetDateTime;

use super::repo_types::Mood;
use crate::store::{generate_id, Store, StoreError};

/// Caller's moods, newest first.
pub async fn list_by_user(store: &dyn Store, user_id: &str) -> Result<Vec<Mood>, StoreError> {
    let doc = store.load().await?;
    let mut moods: Vec<Mood> = doc
        .moods
        .into_iter()
        .filter(|m| m.user_id == user_id)
        .collect();
    moods.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(moods)
}

pub async fn create(
    store: &dyn Store,
    user_id: &str,
    emoji: Option<String>,
    rating: Option<f64>,
    note: String,
    date: String,
) -> Result<Mood, StoreError> {
    let mood = Mood {
        id: generate_id(),
        emoji,
        rating,
        note,
        date,
        user_id: user_id.to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    let record = mood.clone();
    store
        .update(Box::new(move |doc| doc.moods.push(record)))
        .await?;
    Ok(mood)
}
