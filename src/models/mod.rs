// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod interaction;
pub mod user;

pub use interaction::{Interaction, InteractionKind, Toggle};
pub use user::User;
