//! sled-backed key-value medium
//!
//! Values are JSON encoded. This is the persistence medium the access-token
//! store reads and writes through, see [`crate::token::TokenStore`].

use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Where and how the store is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvConfig {
    /// Database directory
    pub path: String,
    /// Background flush interval; `None` leaves flushing to the caller
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self { path: "stayhub_kv.db".to_string(), flush_every_ms: Some(500) }
    }
}

impl KvConfig {
    /// Store under `path` with the default flush interval
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set the background flush interval
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// JSON values in a sled tree
#[derive(Clone)]
pub struct KvStore {
    db: Db,
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore").field("keys", &self.db.len()).finish()
    }
}

impl KvStore {
    /// Open the store described by `config`
    pub fn new(config: KvConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .flush_every_ms(config.flush_every_ms)
            .open()?;
        tracing::debug!(path = %config.path, "opened key-value store");
        Ok(Self { db })
    }

    /// Open a throwaway store that lives in memory
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    fn key_bytes(key: &str) -> Result<&[u8]> {
        if key.is_empty() {
            return Err(KvError::InvalidKey("key must not be empty".to_string()));
        }
        Ok(key.as_bytes())
    }

    /// Value stored under `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.db
            .get(Self::key_bytes(key)?)?
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(KvError::from)
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(Self::key_bytes(key)?, bytes)?;
        Ok(())
    }

    /// Delete `key`, returning whether it was present
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(Self::key_bytes(key)?)?.is_some())
    }

    /// Write pending changes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
