// SPDX-License-Identifier: MIT

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User identity record, created on first login.
///
/// The email is the natural key: logging in again with the same
/// verified email resolves to the same row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Row id (also stored in the session)
    pub id: i64,
    /// Verified email from the identity provider (unique, immutable)
    pub email: String,
    /// Display name (may not be shared by the provider)
    pub name: Option<String>,
    /// Profile picture URL
    pub picture: Option<String>,
    /// When the user first logged in (RFC 3339)
    pub created_at: String,
}

impl User {
    /// Name to show in page headers; falls back to the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}
