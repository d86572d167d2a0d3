//! Session state shared by all resource clients
//!
//! The session holds the bearer token the transport attaches to requests.
//! It is populated by the caller after login, cleared by an explicit
//! `clear`, and cleared by the transport when the backend answers 401.
//! The token is treated as an opaque string; claims are never decoded here.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Session data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The token type
    pub token_type: String,

    /// The expiry timestamp, seconds since the epoch
    pub expires_at: Option<i64>,
}

impl Session {
    /// Create a new session expiring `expires_in` seconds from now
    pub fn new(access_token: String, expires_in: i64) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_secs() as i64;

        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_at: Some(now + expires_in),
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::from_secs(0))
                .as_secs() as i64;

            now >= expires_at
        } else {
            false
        }
    }
}

/// Process-wide session slot with explicit get/set/clear operations.
///
/// Cloning shares the underlying slot, so every resource client holding a
/// clone observes a 401-triggered clear immediately.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Option<Session>>>,
}

impl SessionStore {
    /// Create an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current session
    pub fn get(&self) -> Option<Session> {
        let current = self.inner.lock().unwrap();
        current.clone()
    }

    /// Get the current access token, if a session is present
    pub fn token(&self) -> Option<String> {
        let current = self.inner.lock().unwrap();
        current.as_ref().map(|s| s.access_token.clone())
    }

    /// Replace the current session
    pub fn set(&self, session: Session) {
        let mut current = self.inner.lock().unwrap();
        *current = Some(session);
    }

    /// Drop the current session
    pub fn clear(&self) {
        let mut current = self.inner.lock().unwrap();
        *current = None;
    }

    /// Whether a session is currently stored
    pub fn is_authenticated(&self) -> bool {
        let current = self.inner.lock().unwrap();
        current.is_some()
    }
}
