// SPDX-License-Identifier: MIT

//! Google OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::auth::SESSION_COOKIE;
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// How long a signed state parameter stays valid.
const STATE_MAX_AGE_MS: u128 = 10 * 60 * 1000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login))
        .route("/authorize", get(authorize))
        .route("/logout", get(logout))
}

/// Start OAuth flow - redirect to Google authorization.
async fn login(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let oauth_state = sign_state(&state.config.oauth_state_key)?;
    let auth_url = state
        .google
        .authorize_redirect(&state.config.oauth_redirect_uri(), &oauth_state);

    tracing::info!(
        client_id = %state.config.google_client_id,
        "Starting OAuth flow, redirecting to Google"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - verify state, exchange code, link identity, open session.
async fn authorize(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        return Err(AppError::OAuth(format!("Provider returned error: {}", error)));
    }

    let oauth_state = params
        .state
        .ok_or_else(|| AppError::BadRequest("Missing state parameter".to_string()))?;
    verify_state(&oauth_state, &state.config.oauth_state_key)?;

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing code parameter".to_string()))?;

    // Exchange code, fetch the verified email. Failures are not retried.
    let info = state
        .google
        .handle_oauth_callback(&code, &state.config.oauth_redirect_uri())
        .await?;

    // Map the verified email to a local user, creating one on first login
    let user = state
        .db
        .find_or_create_user(&info.email, info.name.as_deref(), info.picture.as_deref())
        .await?;

    let token = state.sessions.create(user.id)?;

    tracing::info!(user_id = user.id, "Login complete, session created");

    let jar = jar.add(session_cookie(token, &state.config));
    Ok((jar, Redirect::to("/dashboard")))
}

/// Clear the session and return to the home page.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value());
    }

    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (jar.remove(removal), Redirect::to("/"))
}

fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(time::Duration::seconds(config.session_ttl_secs as i64))
        .build()
}

// ─── OAuth State Signing ─────────────────────────────────────

/// Sign a timestamped state payload for the OAuth round-trip.
///
/// Format before encoding: `login|timestamp_hex|signature_hex`, then
/// URL-safe base64 for the query string.
pub fn sign_state(key: &[u8]) -> Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    let payload = format!("login|{:x}", timestamp);

    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    let signed = format!("{}|{}", payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
}

/// Verify a state parameter from the callback: signature first, then age.
pub fn verify_state(state: &str, key: &[u8]) -> Result<()> {
    let invalid = || AppError::BadRequest("Invalid state parameter".to_string());

    let bytes = URL_SAFE_NO_PAD.decode(state).map_err(|_| invalid())?;
    let decoded = String::from_utf8(bytes).map_err(|_| invalid())?;

    // Signature is the last pipe-delimited segment
    let (payload, sig_hex) = decoded.rsplit_once('|').ok_or_else(invalid)?;
    let signature = hex::decode(sig_hex).map_err(|_| invalid())?;

    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).map_err(|_| invalid())?;

    let ts_hex = payload.rsplit('|').next().ok_or_else(invalid)?;
    let issued_at = u128::from_str_radix(ts_hex, 16).map_err(|_| invalid())?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    if now.saturating_sub(issued_at) > STATE_MAX_AGE_MS {
        return Err(AppError::BadRequest("Expired state parameter".to_string()));
    }

    Ok(())
}
