//! Auth presence derived from the persisted access token
//!
//! This state never owns the token. It forwards reads, writes and deletes
//! to the storage layer and answers "is a token present" by re-reading
//! storage every time, so it cannot go stale after a login or logout in
//! another part of the app.

use std::sync::Arc;

use storage::{KvStore, TokenStore};

/// Read-only auth presence over the token store
#[derive(Debug, Clone)]
pub struct AuthPresenceState {
    tokens: TokenStore,
}

impl AuthPresenceState {
    /// Create auth presence over an existing token store
    pub fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    /// Create auth presence backed by a key-value store
    pub fn with_kv(kv: Arc<KvStore>) -> Self {
        Self::new(TokenStore::new(kv))
    }

    /// Auth presence for an environment without persistent storage
    pub fn unavailable() -> Self {
        Self::new(TokenStore::unavailable())
    }

    /// The stored access token, if any
    pub fn token(&self) -> Option<String> {
        self.tokens.read()
    }

    /// Persist an access token
    pub fn set_token(&self, token: &str) {
        self.tokens.write(token);
        tracing::debug!(present = self.is_present(), "access token written");
    }

    /// Delete the access token
    pub fn clear_token(&self) {
        self.tokens.delete();
        tracing::debug!("access token cleared");
    }

    /// Whether an access token is stored
    pub fn is_present(&self) -> bool {
        self.tokens.is_present()
    }
}
