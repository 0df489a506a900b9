// SPDX-License-Identifier: MIT

//! Interaction model: per-user actions against externally hosted images.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of interaction a user can record against an image.
///
/// Stored as lowercase TEXT; at most one row of a given kind exists
/// per (user, image URL) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Favorite,
    Comment,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Like => "like",
            InteractionKind::Favorite => "favorite",
            InteractionKind::Comment => "comment",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(InteractionKind::Like),
            "favorite" => Ok(InteractionKind::Favorite),
            "comment" => Ok(InteractionKind::Comment),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Error for interaction kinds outside the enumerated set.
#[derive(Debug, thiserror::Error)]
#[error("unknown interaction type: {0}")]
pub struct UnknownKind(pub String);

/// A recorded interaction. Rows are created and deleted by the toggle
/// operation, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Interaction {
    pub id: i64,
    pub user_id: i64,
    /// Image URL, matched exactly (no normalization)
    pub image_url: String,
    pub image_title: Option<String>,
    pub kind: InteractionKind,
    /// Free-text content, meaningful only for comments
    pub content: Option<String>,
    /// Creation time (RFC 3339)
    pub created_at: String,
}

impl Interaction {
    /// Title to show in listings.
    pub fn title(&self) -> &str {
        self.image_title.as_deref().unwrap_or("Untitled")
    }
}

/// Outcome of a toggle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

impl Toggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Toggle::Added => "added",
            Toggle::Removed => "removed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            InteractionKind::Like,
            InteractionKind::Favorite,
            InteractionKind::Comment,
        ] {
            assert_eq!(kind.as_str().parse::<InteractionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_rejects_unknown() {
        assert!("repost".parse::<InteractionKind>().is_err());
        assert!("LIKE".parse::<InteractionKind>().is_err());
        assert!("".parse::<InteractionKind>().is_err());
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&InteractionKind::Favorite).unwrap();
        assert_eq!(json, "\"favorite\"");
    }
}
