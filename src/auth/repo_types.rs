use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// User record as persisted. `password` holds the argon2 hash; the
/// wire-facing shape is [`crate::auth::dto::PublicUser`], which omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
