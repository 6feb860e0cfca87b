//! Persistence adapter boundary
//!
//! Engines never talk to a store directly; orchestration services go
//! through this trait so tests can inject the in-memory fake. Every
//! write is a compare-and-swap against the version the caller read,
//! which is how near-simultaneous client actions are detected instead
//! of silently overwritten.

mod memory;
mod redis;

pub use self::redis::RedisStore;
pub use memory::MemoryStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::StoreResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Versioned document envelope
///
/// `version` and `updated_at` are assigned by the adapter at write
/// time, so timestamps are server-side and never come from client
/// clocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub body: serde_json::Value,
}

/// Key-value document store with optimistic concurrency
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Fetch a document, or None if the key has never been written
    async fn get(&self, key: &str) -> StoreResult<Option<StoredDocument>>;

    /// Write a document if the stored version still matches
    ///
    /// `expected_version` is the version the caller read (0 for a key
    /// with no prior document). On a match the adapter stores the body
    /// at `expected_version + 1` with a fresh `updated_at`; on a
    /// mismatch it returns `VersionConflict` and writes nothing.
    async fn put(
        &self,
        key: &str,
        body: serde_json::Value,
        expected_version: u64,
    ) -> StoreResult<StoredDocument>;

    /// Check the adapter can reach its backing store
    async fn health_check(&self) -> StoreResult<()>;
}

/// Open the adapter selected by configuration
pub async fn open(config: &StoreConfig) -> StoreResult<Arc<dyn PersistenceAdapter>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Redis => Ok(Arc::new(RedisStore::connect(&config.redis).await?)),
    }
}
