// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Public base URL of this server, used to build the OAuth redirect URI
    pub public_url: String,
    /// SQLite database URL
    pub database_url: String,
    /// Server port
    pub port: u16,
    /// Session lifetime in seconds
    pub session_ttl_secs: u64,
    /// HMAC key for signing the OAuth state parameter (raw bytes)
    pub oauth_state_key: Vec<u8>,
    /// Whether session cookies carry the Secure attribute
    pub secure_cookies: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_secret".to_string(),
            public_url: "http://localhost:8080".to_string(),
            database_url: "sqlite::memory:".to_string(),
            port: 8080,
            session_ttl_secs: 30 * 24 * 60 * 60,
            oauth_state_key: b"test_state_key_32_bytes_minimum!".to_vec(),
            secure_cookies: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, secrets can be set via a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let public_url =
            env::var("PUBLIC_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        Ok(Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            // Cookies must be Secure when the site is served over https
            secure_cookies: public_url.starts_with("https://"),
            public_url,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://gallery.db".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            session_ttl_secs: env::var("SESSION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30 * 24 * 60 * 60),
            oauth_state_key: env::var("OAUTH_STATE_KEY")
                .map_err(|_| ConfigError::Missing("OAUTH_STATE_KEY"))?
                .into_bytes(),
        })
    }

    /// OAuth redirect URI registered with the identity provider.
    pub fn oauth_redirect_uri(&self) -> String {
        format!("{}/authorize", self.public_url)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
