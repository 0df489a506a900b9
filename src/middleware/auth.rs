// SPDX-License-Identifier: MIT

//! Session-cookie authentication middleware.

use crate::error::AppError;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie holding the opaque session token.
pub const SESSION_COOKIE: &str = "gallery_session";

/// Authenticated user attached to the request by `require_auth`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

/// Resolve the current user from the session cookie.
///
/// Read-only: returns `None` when the cookie is absent, the token is unknown
/// or expired, or the session references a user row that no longer exists.
pub async fn current_user(state: &AppState, jar: &CookieJar) -> Result<Option<User>, AppError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    let Some(user_id) = state.sessions.get(cookie.value()) else {
        return Ok(None);
    };

    state.db.user_by_id(user_id).await
}

/// Middleware that requires an authenticated session.
///
/// Anonymous callers get the structured 401 body; page routes do their own
/// lookup via `current_user` and redirect instead.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = current_user(&state, &jar)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(AuthUser { user });

    Ok(next.run(request).await)
}
