//! Registration and login.

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::ValidateEmail;

use reelcut_store::User;

use crate::auth::{hash_password, is_strong_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<Response> {
    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Name is required"))?;
    let email = body
        .email
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Email is required"))?;
    let password = body
        .password
        .as_deref()
        .ok_or_else(|| ApiError::validation("Password is required"))?;

    if !email.validate_email() {
        return Err(ApiError::validation("Invalid email format"));
    }
    if body.confirm_password.as_deref() != Some(password) {
        return Err(ApiError::validation("Passwords do not match"));
    }
    if !is_strong_password(password) {
        return Err(ApiError::validation(
            "Password must be 8-72 characters with upper, lower, digit and special",
        ));
    }

    let password_hash = hash_password(password)?;
    let user = state.users.create(name, &email, &password_hash).await?;
    let token = state.jwt.issue(&user.id, &user.email)?;

    info!(user_id = %user.id, "User registered");
    Ok(Envelope::created(
        "Account created",
        SessionResponse {
            token,
            user: user.into(),
        },
    ))
}

/// POST /auth/login
///
/// The failure counter blocks an identity after too many consecutive bad
/// passwords, regardless of whether a later attempt would have succeeded;
/// one successful login clears it.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Response> {
    let email = body
        .email
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Email is required"))?;
    let password = body
        .password
        .as_deref()
        .ok_or_else(|| ApiError::validation("Password is required"))?;

    if state.login_limiter.blocked(&email).await? {
        return Err(ApiError::rate_limited(
            "Too many failed attempts. Try again later.",
        ));
    }

    let Some(user) = state.users.find_by_email(&email).await? else {
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !verify_password(password, &user.password_hash) {
        state.login_limiter.hit(&email).await?;
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    state.login_limiter.reset(&email).await?;
    let token = state.jwt.issue(&user.id, &user.email)?;

    info!(user_id = %user.id, "User logged in");
    Ok(Envelope::ok(json!({
        "token": token,
        "user": PublicUser::from(user),
    })))
}
