//! Session lifecycle: signup, login, logout, refresh, profile.

use crate::cookies::{self, REFRESH_COOKIE};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;
use storefront_core::User;
use storefront_records::NewUser;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\-.]+@([\w-]+\.)+[\w-]{2,4}$").expect("email regex"));

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub message: String,
    pub user: User,
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    if !EMAIL_RE.is_match(email) {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}

/// Mint a token pair, persist the refresh token, and set both cookies.
async fn establish_session(
    state: &AppState,
    jar: CookieJar,
    user_id: &str,
) -> Result<CookieJar, ApiError> {
    let pair = state.tokens.issue_pair(user_id)?;
    state.credentials.save(user_id, &pair.refresh).await?;
    Ok(cookies::set_session(jar, &pair, state.secure_cookies()))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> Result<(CookieJar, (StatusCode, Json<SessionResponse>)), ApiError> {
    if body.name.is_empty() || body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation("All fields are required".to_string()));
    }
    validate_password(&body.password)?;
    validate_email(&body.email)?;

    let user = state
        .users
        .create(NewUser {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = establish_session(&state, jar, &user.id).await?;
    tracing::info!(user_id = %user.id, "user signed up");

    Ok((
        jar,
        (
            StatusCode::CREATED,
            Json(SessionResponse {
                message: "User created successfully".to_string(),
                user,
            }),
        ),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation("All fields are required".to_string()));
    }
    validate_email(&body.email)?;
    validate_password(&body.password)?;

    let record = state
        .users
        .find_by_email(&body.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User does not exist".to_string()))?;

    if !record.verify_password(&body.password) {
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }

    let jar = establish_session(&state, jar, &record.user.id).await?;
    tracing::info!(user_id = %record.user.id, "user logged in");

    Ok((
        jar,
        Json(SessionResponse {
            message: "User logged in successfully".to_string(),
            user: record.user,
        }),
    ))
}

/// GET /api/auth/logout
///
/// Best-effort: a missing or invalid refresh cookie is not an error, but the
/// cookies are always cleared.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        if let Ok(claims) = state.tokens.verify_refresh(cookie.value()) {
            state.credentials.delete(&claims.sub).await?;
            tracing::info!(user_id = %claims.sub, "user logged out");
        }
    }
    Ok((
        cookies::clear_session(jar),
        Json(json!({ "message": "Logged out successfully" })),
    ))
}

/// POST /api/auth/refresh-token
///
/// Re-issues the access token only. The refresh token and its store entry are
/// left untouched, which is what makes concurrent refreshes harmless.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::Unauthorized("No refresh token provided".to_string()))?;

    let claims = state
        .tokens
        .verify_refresh(&token)
        .map_err(|_| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    // Signature alone is not enough: the token must still be the stored one.
    // A mismatch covers both "never issued" and "superseded by a later login".
    if !state.credentials.matches(&claims.sub, &token).await? {
        return Err(ApiError::Unauthorized("Refresh token mismatch".to_string()));
    }

    let access = state.tokens.issue_access(&claims.sub)?;
    let jar = cookies::set_access(jar, access, state.secure_cookies());

    Ok((jar, Json(json!({ "message": "Token refreshed successfully" }))))
}

/// GET /api/auth/profile
pub async fn profile(Extension(current): Extension<CurrentUser>) -> Json<User> {
    Json(current.0)
}
