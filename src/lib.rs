// SPDX-License-Identifier: MIT

//! Gallery API: record per-user interactions against externally hosted images.
//!
//! This crate provides the backend for a small gallery site: Google OAuth
//! login, server-side sessions, and toggleable like/favorite/comment
//! interactions stored in SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::{GoogleClient, SessionStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub sessions: SessionStore,
    pub google: GoogleClient,
}
