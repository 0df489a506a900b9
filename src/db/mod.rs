// SPDX-License-Identifier: MIT

//! SQLite database layer with typed operations.
//!
//! Provides high-level operations for:
//! - Users (identity records keyed by email)
//! - Interactions (per-user toggleable actions against image URLs)

use crate::error::AppError;
use crate::models::{Interaction, InteractionKind, Toggle, User};
use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Schema applied at startup. The unique index on (user_id, image_url, kind)
/// enforces the at-most-one-interaction-per-kind invariant in the storage
/// engine itself, backing up the toggle logic.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,
    name        TEXT,
    picture     TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS interactions (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id      INTEGER NOT NULL REFERENCES users(id),
    image_url    TEXT NOT NULL,
    image_title  TEXT,
    kind         TEXT NOT NULL,
    content      TEXT,
    created_at   TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS interactions_user_image_kind
    ON interactions (user_id, image_url, kind);
";

/// SQLite database client.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory SQLite database exists per connection; more than one
        // connection in the pool would see different databases.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to apply schema: {}", e)))?;

        tracing::info!(url = database_url, "Database ready");

        Ok(Self { pool })
    }

    /// In-memory database for tests.
    pub async fn connect_in_memory() -> Result<Self, AppError> {
        Self::connect("sqlite::memory:").await
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by row id.
    pub async fn user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, picture, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by email (the natural key).
    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, picture, created_at FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up a user by email, creating the record on first login.
    ///
    /// A concurrent first login for the same email can lose the INSERT race
    /// against the unique constraint; the loser re-reads the winner's row, so
    /// the same email never maps to two users.
    pub async fn find_or_create_user(
        &self,
        email: &str,
        name: Option<&str>,
        picture: Option<&str>,
    ) -> Result<User, AppError> {
        if let Some(user) = self.user_by_email(email).await? {
            return Ok(user);
        }

        let inserted = sqlx::query(
            "INSERT INTO users (email, name, picture, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(email)
        .bind(name)
        .bind(picture)
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(done) => {
                let id = done.last_insert_rowid();
                tracing::info!(user_id = id, "Created user on first login");
                self.user_by_id(id).await?.ok_or_else(|| {
                    AppError::Database("User row missing immediately after insert".to_string())
                })
            }
            Err(e) if is_unique_violation(&e) => {
                self.user_by_email(email).await?.ok_or_else(|| {
                    AppError::Database("User insert conflicted but row not found".to_string())
                })
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    // ─── Interaction Operations ──────────────────────────────────

    /// Toggle an interaction for (user, image URL, kind).
    ///
    /// Delete-else-insert runs in one transaction so two concurrent identical
    /// toggles serialize instead of interleaving their check and write steps.
    /// The image URL is matched exactly, with no normalization.
    pub async fn toggle_interaction(
        &self,
        user_id: i64,
        image_url: &str,
        image_title: Option<&str>,
        kind: InteractionKind,
        content: Option<&str>,
    ) -> Result<Toggle, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted = sqlx::query(
            "DELETE FROM interactions WHERE user_id = ?1 AND image_url = ?2 AND kind = ?3",
        )
        .bind(user_id)
        .bind(image_url)
        .bind(kind)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let outcome = if deleted.rows_affected() > 0 {
            Toggle::Removed
        } else {
            sqlx::query(
                "INSERT INTO interactions (user_id, image_url, image_title, kind, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(user_id)
            .bind(image_url)
            .bind(image_title)
            .bind(kind)
            .bind(content)
            .bind(now_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
            Toggle::Added
        };

        tx.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(outcome)
    }

    /// All interactions owned by a user, newest first, optionally filtered
    /// to a single kind. `id DESC` breaks ties within the same second.
    pub async fn interactions_for_user(
        &self,
        user_id: i64,
        kind: Option<InteractionKind>,
    ) -> Result<Vec<Interaction>, AppError> {
        let rows = match kind {
            Some(kind) => {
                sqlx::query_as::<_, Interaction>(
                    "SELECT id, user_id, image_url, image_title, kind, content, created_at
                     FROM interactions
                     WHERE user_id = ?1 AND kind = ?2
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(user_id)
                .bind(kind)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Interaction>(
                    "SELECT id, user_id, image_url, image_title, kind, content, created_at
                     FROM interactions
                     WHERE user_id = ?1
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        };

        rows.map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Current time as RFC 3339 with a `Z` suffix, the stored timestamp format.
fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
