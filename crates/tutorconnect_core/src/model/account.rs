//! User account model for the simulated authentication flow.
//!
//! Passwords are stored verbatim: this layer simulates a backend for demo
//! purposes and real credential handling is explicitly out of scope.

use serde::{Deserialize, Serialize};

/// Registered user identity, persisted in the `users` list and mirrored into
/// the session namespace while logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Stable identifier, `user-<timestamp>`.
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Creation timestamp, display string.
    pub created: String,
}

/// Input for [`crate::service::AccountService::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
