use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{AuthResponse, LoginRequest, MeResponse, SignupRequest},
    extractors::CurrentUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo,
};
use crate::error::ApiError;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

/// A field counts as supplied only when present and non-empty.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (Some(name), Some(email), Some(password)) = (
        required(payload.name),
        required(payload.email),
        required(payload.password),
    ) else {
        return Err(ApiError::validation("All fields are required"));
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        warn!("signup password too short");
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }

    if repo::find_by_email(state.store.as_ref(), &email)
        .await?
        .is_some()
    {
        warn!(email = %email, "signup email already registered");
        return Err(ApiError::conflict("User already exists with this email"));
    }

    let hash = hash_password(&password)?;
    let user = repo::create(state.store.as_ref(), &name, &email, &hash).await?;
    let token = JwtKeys::from_ref(&state).sign(&user.id)?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".into(),
            user: user.into(),
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(email), Some(password)) = (required(payload.email), required(payload.password))
    else {
        return Err(ApiError::validation("Email and password are required"));
    };

    // Unknown email and wrong password share one answer so logins
    // cannot be used to enumerate accounts.
    let Some(user) = repo::find_by_email(state.store.as_ref(), &email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(ApiError::auth("Invalid credentials"));
    };

    if !verify_password(&password, &user.password)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::auth("Invalid credentials"));
    }

    let token = JwtKeys::from_ref(&state).sign(&user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        user: user.into(),
        token,
    }))
}

#[instrument(skip(user), fields(user_id = %user.id))]
pub async fn me(CurrentUser(user): CurrentUser) -> Result<Json<MeResponse>, ApiError> {
    Ok(Json(MeResponse { user: user.into() }))
}
