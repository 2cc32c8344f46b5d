use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record as stored in the users document.
///
/// The password is kept verbatim to stay byte-compatible with the shipped
/// `users.json` asset; it never leaves this type (see `SessionUser`).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String, // PRIMARY IDENTIFIER - "user-NNNNNN", assigned sequentially
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl User {
    /// Session-visible projection of this account. No password by construction.
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            is_admin: false,
            created_at: Some(self.created_at),
            last_login: Some(self.last_login),
        }
    }
}

/// The currently authenticated identity, persisted under the `currentUser`
/// storage key. The synthetic administrator has no timestamps.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// Top-level users document (`users.json` / `usersData` storage key).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UsersDocument {
    pub users: Vec<User>,
    pub next_user_id: u64,
}

impl Default for UsersDocument {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            next_user_id: 1,
        }
    }
}

// Request structures
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
