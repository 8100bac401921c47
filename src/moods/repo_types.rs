use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Mood journal entry. Append-only: there is no update or delete path.
/// At least one of `emoji` / `rating` is present, enforced at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mood {
    pub id: String,
    pub emoji: Option<String>,
    pub rating: Option<f64>,
    pub note: String,
    /// Calendar day, YYYY-MM-DD.
    pub date: String,
    pub user_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
