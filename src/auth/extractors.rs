use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::{jwt::JwtKeys, repo, repo_types::User};
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the bearer token, verifies it and loads the caller's user
/// record. Any failure, including a token for a user that no longer
/// exists, is the same 401.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::auth("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::auth("Invalid Authorization header"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::auth("Invalid or expired token")
        })?;

        let user = repo::find_by_id(state.store.as_ref(), &claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token for unknown user");
                ApiError::auth("Invalid or expired token")
            })?;

        Ok(CurrentUser(user))
    }
}
