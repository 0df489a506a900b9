// SPDX-License-Identifier: MIT

use gallery_api::config::Config;
use gallery_api::db::Database;
use gallery_api::models::User;
use gallery_api::routes::create_router;
use gallery_api::services::{GoogleClient, SessionStore};
use gallery_api::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Create a test app backed by an in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();

    let db = Database::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
    let google = GoogleClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );

    let state = Arc::new(AppState {
        config,
        db,
        sessions,
        google,
    });

    (create_router(state.clone()), state)
}

/// Create a user plus a live session, returning the user and the value
/// for the request's Cookie header.
#[allow(dead_code)]
pub async fn login_test_user(state: &AppState, email: &str) -> (User, String) {
    let user = state
        .db
        .find_or_create_user(email, Some("Test User"), None)
        .await
        .expect("Failed to create test user");
    let token = state.sessions.create(user.id).expect("Failed to create session");
    (user, format!("gallery_session={}", token))
}
