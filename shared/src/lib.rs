use serde::{Deserialize, Serialize};

// Auth collaborator contract and change notification plumbing
pub mod auth;
pub use auth::{
    AuthChangeEvent, AuthClient, AuthError, AuthListener, ListenerRegistry, Subscription,
};

/// User record attached to an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier assigned by the auth service
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// Server-issued credential bundle for an authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry as unix seconds. Sessions without one never expire client-side.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now_secs)
    }
}
