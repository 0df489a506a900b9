// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod google;
pub mod session;

pub use google::{GoogleClient, UserInfo};
pub use session::SessionStore;
