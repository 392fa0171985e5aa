//! Access-token store over an optional persistence medium
//!
//! The token itself is owned by the medium. [`TokenStore`] only reads,
//! writes and deletes the single `access_token` entry, and it never fails:
//! when no medium exists (non-interactive rendering) or the medium errors,
//! every read comes back empty and every write is dropped.

use std::sync::Arc;

use crate::kv::{KvStore, Result};

/// Fixed key the access token is persisted under
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// A string-valued persistence medium
#[cfg_attr(test, mockall::automock)]
pub trait TokenMedium: Send + Sync {
    /// Read the value stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`
    fn delete(&self, key: &str) -> Result<()>;
}

impl TokenMedium for KvStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.get::<String>(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, &value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.remove(key).map(|_| ())
    }
}

/// Store for the persisted access token
#[derive(Clone)]
pub struct TokenStore {
    medium: Option<Arc<dyn TokenMedium>>,
    key: &'static str,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("available", &self.is_available())
            .field("key", &self.key)
            .finish()
    }
}

impl TokenStore {
    /// Create a token store backed by `medium`
    pub fn new(medium: Arc<dyn TokenMedium>) -> Self {
        Self { medium: Some(medium), key: ACCESS_TOKEN_KEY }
    }

    /// Create a token store for an environment with no persistence medium
    pub fn unavailable() -> Self {
        Self { medium: None, key: ACCESS_TOKEN_KEY }
    }

    /// Whether a persistence medium exists
    pub fn is_available(&self) -> bool {
        self.medium.is_some()
    }

    /// Read the stored token
    pub fn read(&self) -> Option<String> {
        let medium = self.medium.as_ref()?;
        match medium.read(self.key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, key = self.key, "token read failed, treating as absent");
                None
            }
        }
    }

    /// Persist a token, replacing any previous one
    pub fn write(&self, token: &str) {
        let Some(medium) = self.medium.as_ref() else {
            tracing::debug!("no storage medium, dropping token write");
            return;
        };
        if let Err(e) = medium.write(self.key, token) {
            tracing::warn!(error = %e, key = self.key, "token write failed");
        }
    }

    /// Delete the stored token
    pub fn delete(&self) {
        let Some(medium) = self.medium.as_ref() else {
            return;
        };
        if let Err(e) = medium.delete(self.key) {
            tracing::warn!(error = %e, key = self.key, "token delete failed");
        }
    }

    /// Whether a non-empty token is currently stored
    ///
    /// Re-reads the medium on every call.
    pub fn is_present(&self) -> bool {
        self.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KvError;
    use mockall::predicate::eq;

    fn kv_store() -> TokenStore {
        TokenStore::new(Arc::new(KvStore::in_memory().unwrap()))
    }

    #[test]
    fn test_write_then_present() {
        let store = kv_store();
        assert!(!store.is_present());

        store.write("tok_123");
        assert!(store.is_present());
        assert_eq!(store.read(), Some("tok_123".to_string()));
    }

    #[test]
    fn test_delete_then_absent() {
        let store = kv_store();
        store.write("tok_123");
        store.delete();
        assert!(!store.is_present());
        assert_eq!(store.read(), None);

        // deleting again is harmless
        store.delete();
        assert!(!store.is_present());
    }

    #[test]
    fn test_unavailable_medium_is_silent() {
        let store = TokenStore::unavailable();
        assert!(!store.is_available());

        store.write("tok_123");
        assert!(!store.is_present());
        assert_eq!(store.read(), None);
        store.delete();
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let store = kv_store();
        store.write("");
        assert!(!store.is_present());
    }

    #[test]
    fn test_presence_rereads_medium() {
        let kv = Arc::new(KvStore::in_memory().unwrap());
        let store = TokenStore::new(kv.clone());
        assert!(!store.is_present());

        // written behind the store's back
        kv.set(ACCESS_TOKEN_KEY, &"external".to_string()).unwrap();
        assert!(store.is_present());

        kv.remove(ACCESS_TOKEN_KEY).unwrap();
        assert!(!store.is_present());
    }

    #[test]
    fn test_medium_errors_degrade_to_absent() {
        let mut medium = MockTokenMedium::new();
        medium
            .expect_read()
            .with(eq(ACCESS_TOKEN_KEY))
            .returning(|_| Err(KvError::InvalidKey("corrupt".to_string())));
        medium
            .expect_write()
            .returning(|_, _| Err(KvError::InvalidKey("read-only".to_string())));

        let store = TokenStore::new(Arc::new(medium));
        store.write("tok");
        assert!(!store.is_present());
    }

    #[test]
    fn test_uses_access_token_key() {
        let mut medium = MockTokenMedium::new();
        medium
            .expect_write()
            .with(eq(ACCESS_TOKEN_KEY), eq("tok"))
            .times(1)
            .returning(|_, _| Ok(()));
        medium
            .expect_delete()
            .with(eq(ACCESS_TOKEN_KEY))
            .times(1)
            .returning(|_| Ok(()));

        let store = TokenStore::new(Arc::new(medium));
        store.write("tok");
        store.delete();
    }
}
