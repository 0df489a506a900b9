// SPDX-License-Identifier: MIT

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Interaction, InteractionKind};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API routes (require authentication via session cookie).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/interact", post(interact))
        .route("/api/user/interactions", get(get_user_interactions))
}

// ─── Interaction Toggle ──────────────────────────────────────

#[derive(Deserialize)]
pub struct InteractRequest {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image_title: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
pub struct InteractResponse {
    pub status: String,
    pub interaction_type: InteractionKind,
}

/// Toggle an interaction on an image: absent rows are added, present rows
/// removed. Calling it twice with the same inputs is a no-op overall.
async fn interact(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<InteractRequest>,
) -> Result<Json<InteractResponse>> {
    // Empty strings count as missing
    let image_url = req
        .image_url
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required field: image_url".to_string()))?;

    let kind: InteractionKind = req
        .kind
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required field: type".to_string()))?
        .parse()
        .map_err(|e: crate::models::interaction::UnknownKind| {
            AppError::BadRequest(e.to_string())
        })?;

    let outcome = state
        .db
        .toggle_interaction(
            auth.user.id,
            image_url,
            req.image_title.as_deref(),
            kind,
            req.content.as_deref(),
        )
        .await?;

    tracing::info!(
        user_id = auth.user.id,
        kind = %kind,
        outcome = outcome.as_str(),
        "Interaction toggled"
    );

    Ok(Json(InteractResponse {
        status: outcome.as_str().to_string(),
        interaction_type: kind,
    }))
}

// ─── Interaction Query ───────────────────────────────────────

#[derive(Deserialize)]
struct InteractionsQuery {
    /// Filter to a single interaction kind
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Serialize)]
pub struct InteractionsResponse {
    pub interactions: Vec<InteractionSummary>,
}

#[derive(Serialize)]
pub struct InteractionSummary {
    pub id: i64,
    pub image_url: String,
    pub image_title: Option<String>,
    pub interaction_type: InteractionKind,
    pub content: Option<String>,
    pub created_at: String,
}

impl From<Interaction> for InteractionSummary {
    fn from(i: Interaction) -> Self {
        Self {
            id: i.id,
            image_url: i.image_url,
            image_title: i.image_title,
            interaction_type: i.kind,
            content: i.content,
            created_at: i.created_at,
        }
    }
}

/// All of the current user's interactions, newest first.
async fn get_user_interactions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<InteractionsQuery>,
) -> Result<Json<InteractionsResponse>> {
    let kind = params
        .kind
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|raw| {
            raw.parse::<InteractionKind>()
                .map_err(|e| AppError::BadRequest(e.to_string()))
        })
        .transpose()?;

    let interactions = state
        .db
        .interactions_for_user(auth.user.id, kind)
        .await?
        .into_iter()
        .map(InteractionSummary::from)
        .collect();

    Ok(Json(InteractionsResponse { interactions }))
}
