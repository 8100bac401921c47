use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Community quote. Publicly readable, append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
    pub submitted_by: String,
    pub submitted_by_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
