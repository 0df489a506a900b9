// SPDX-License-Identifier: MIT

//! HTML page routes.
//!
//! Rendering is substitution and iteration only; all data is assembled here
//! and handed to the askama templates.

use crate::error::{AppError, Result};
use crate::middleware::auth::current_user;
use crate::models::{Interaction, InteractionKind, User};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/dashboard", get(dashboard))
        .route("/profile", get(profile))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    user: Option<User>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    user: User,
}

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    user: User,
    likes: Vec<Interaction>,
    favorites: Vec<Interaction>,
    comments: Vec<Interaction>,
}

/// Home page, with user context when logged in.
async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Result<Html<String>> {
    let user = current_user(&state, &jar).await?;
    render(IndexTemplate { user })
}

/// Dashboard; anonymous callers are sent back to the home page.
async fn dashboard(State(state): State<Arc<AppState>>, jar: CookieJar) -> Result<Response> {
    let Some(user) = current_user(&state, &jar).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    Ok(render(DashboardTemplate { user })?.into_response())
}

/// Profile page with the user's likes, favorites and comments.
async fn profile(State(state): State<Arc<AppState>>, jar: CookieJar) -> Result<Response> {
    let Some(user) = current_user(&state, &jar).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let likes = state
        .db
        .interactions_for_user(user.id, Some(InteractionKind::Like))
        .await?;
    let favorites = state
        .db
        .interactions_for_user(user.id, Some(InteractionKind::Favorite))
        .await?;
    let comments = state
        .db
        .interactions_for_user(user.id, Some(InteractionKind::Comment))
        .await?;

    Ok(render(ProfileTemplate {
        user,
        likes,
        favorites,
        comments,
    })?
    .into_response())
}

fn render<T: Template>(template: T) -> Result<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Template render failed: {}", e)))
}
