use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::User;

/// Request body for signup. Fields are optional so the handler can
/// answer missing input with the API's own message instead of a serde
/// rejection.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User as returned to clients: everything but the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Response for signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: PublicUser,
}
