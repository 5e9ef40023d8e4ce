//! Accounts, sessions, and the bearer-token extractors
//!
//! Clients log in for an opaque token and send it back as
//! `Authorization: Bearer <token>`.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use pantry_common::db::users::{self, User};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Logged-in caller; rejects the request with 401 otherwise
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

/// Caller who may or may not be logged in
///
/// A missing header is anonymous; a header with an unknown token is still 401
/// so stale clients find out.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

impl OptionalUser {
    pub fn id(&self) -> Option<uuid::Uuid> {
        self.0.as_ref().map(|user| user.id)
    }
}

fn bearer_token(parts: &Parts) -> ApiResult<Option<String>> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Malformed Authorization header".to_string()))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(Some(token.trim().to_string()))
        }
        _ => Err(ApiError::Unauthorized(
            "Expected 'Authorization: Bearer <token>'".to_string(),
        )),
    }
}

async fn resolve_session(state: &AppState, token: &str) -> ApiResult<User> {
    users::find_session_user(&state.db, token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Session expired or invalid. Please log in again.".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| ApiError::Unauthorized("Please log in to continue".to_string()))?;
        let user = resolve_session(state, &token).await?;
        Ok(CurrentUser { user, token })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(OptionalUser(Some(resolve_session(state, &token).await?))),
            None => Ok(OptionalUser(None)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Session issued by signup and login
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/signup
///
/// Creates the account and logs it in.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let Json(credentials) = payload?;

    let user = users::create_user(&state.db, &credentials.email, &credentials.password).await?;
    let token = users::create_session(&state.db, user.id).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse { token, user })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<SessionResponse>> {
    let Json(credentials) = payload?;

    let Some(user) = users::authenticate(&state.db, &credentials.email, &credentials.password).await? else {
        warn!("Failed login attempt");
        return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
    };

    let token = users::create_session(&state.db, user.id).await?;
    info!("User {} logged in", user.id);

    Ok(Json(SessionResponse { token, user }))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, current: CurrentUser) -> ApiResult<StatusCode> {
    users::delete_session(&state.db, &current.token).await?;
    info!("User {} logged out", current.user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}
