// SPDX-License-Identifier: MIT

//! Server-side session store.
//!
//! Maps opaque tokens (held by the client in a cookie) to user ids.
//! Entries expire after a configurable TTL; expiry is enforced lazily on
//! read, so a stale token behaves exactly like an unknown one.

use crate::error::AppError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use std::time::{Duration, Instant};

/// Bytes of entropy per session token (base64-encoded for the cookie).
const TOKEN_BYTES: usize = 32;

struct Session {
    user_id: i64,
    expires_at: Instant,
}

/// In-process session store keyed by opaque token.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
    rng: SystemRandom,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            rng: SystemRandom::new(),
        }
    }

    /// Create a session for a user and return its token.
    pub fn create(&self, user_id: i64) -> Result<String, AppError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Session token generation failed")))?;

        let token = URL_SAFE_NO_PAD.encode(bytes);
        self.sessions.insert(
            token.clone(),
            Session {
                user_id,
                expires_at: Instant::now() + self.ttl,
            },
        );

        Ok(token)
    }

    /// Resolve a token to a user id. Expired entries are dropped on read.
    pub fn get(&self, token: &str) -> Option<i64> {
        let expired = match self.sessions.get(token) {
            Some(session) => {
                if Instant::now() < session.expires_at {
                    return Some(session.user_id);
                }
                true
            }
            None => return None,
        };

        if expired {
            self.sessions.remove(token);
        }
        None
    }

    /// Drop a session (logout). Unknown tokens are a no-op.
    pub fn remove(&self, token: &str) {
        self.sessions.remove(token);
    }
}
