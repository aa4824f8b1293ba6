//! Route guard and role guard.

use crate::cookies::ACCESS_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use storefront_auth::AuthError;
use storefront_core::{Role, User};

/// The user resolved by [`require_auth`], attached to the request for
/// downstream handlers. Never carries the password hash.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Validate the access token cookie and resolve it to a user record.
///
/// Expired tokens get a distinguishable message so the client can attempt a
/// refresh instead of forcing a re-login.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::Unauthorized("No access token provided".to_string()))?;

    let claims = state.tokens.verify_access(&token).map_err(|e| match e {
        AuthError::Expired => ApiError::TokenExpired,
        _ => ApiError::Unauthorized("Invalid access token".to_string()),
    })?;

    let user = state
        .users
        .find_by_id(&claims.sub)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Require the resolved user to be an admin. Composes after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<CurrentUser>() {
        Some(current) if current.0.role == Role::Admin => Ok(next.run(req).await),
        Some(_) => Err(ApiError::Forbidden("Admin access required".to_string())),
        None => Err(ApiError::Unauthorized("No access token provided".to_string())),
    }
}
