//! In-memory persistence adapter
//!
//! The deterministic fake every integration test runs against. Shares
//! the compare-and-swap contract with the production adapter.

use super::{PersistenceAdapter, StoredDocument};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory document store
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<String, StoredDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceAdapter for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<StoredDocument>> {
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        body: serde_json::Value,
        expected_version: u64,
    ) -> StoreResult<StoredDocument> {
        let mut docs = self.docs.write().await;
        let actual = docs.get(key).map(|d| d.version).unwrap_or(0);
        if actual != expected_version {
            return Err(StoreError::VersionConflict {
                key: key.to_string(),
                expected: expected_version,
                actual,
            });
        }

        let document = StoredDocument {
            version: expected_version + 1,
            updated_at: Utc::now(),
            body,
        };
        docs.insert(key.to_string(), document.clone());
        Ok(document)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
