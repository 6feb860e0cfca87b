//! Redis-backed persistence adapter
//!
//! Documents are stored as JSON envelopes under prefixed keys. The
//! compare-and-swap runs as a Lua script so the version check and the
//! write are atomic on the server.

use super::{PersistenceAdapter, StoredDocument};
use crate::config::RedisConfig;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};
use tracing::{debug, info};

/// Atomic version check + write
///
/// ARGV[1] is the serialized envelope to store, ARGV[2] the version the
/// caller read. Returns {1, new_version} on success, {0, actual} on a
/// version mismatch.
const CAS_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
local version = 0
if current then
    version = cjson.decode(current)['version']
end
if version ~= tonumber(ARGV[2]) then
    return {0, version}
end
redis.call('SET', KEYS[1], ARGV[1])
return {1, version + 1}
"#;

/// Redis document store
pub struct RedisStore {
    conn: ConnectionManager,
    key_prefix: String,
    cas: Script,
}

impl RedisStore {
    /// Connect to Redis with an auto-reconnecting connection manager
    pub async fn connect(config: &RedisConfig) -> StoreResult<Self> {
        info!("Connecting to Redis...");
        let client = redis::Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;
        info!("Redis connection established");

        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
            cas: Script::new(CAS_SCRIPT),
        })
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

#[async_trait]
impl PersistenceAdapter for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<StoredDocument>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(self.prefixed(key)).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &str,
        body: serde_json::Value,
        expected_version: u64,
    ) -> StoreResult<StoredDocument> {
        let document = StoredDocument {
            version: expected_version + 1,
            updated_at: Utc::now(),
            body,
        };
        let payload = serde_json::to_string(&document)?;

        let mut conn = self.conn.clone();
        let result: Vec<i64> = self
            .cas
            .key(self.prefixed(key))
            .arg(&payload)
            .arg(expected_version)
            .invoke_async(&mut conn)
            .await?;

        if result.first() != Some(&1) {
            let actual = result.get(1).copied().unwrap_or(0) as u64;
            debug!(key, expected_version, actual, "CAS write refused");
            return Err(StoreError::VersionConflict {
                key: key.to_string(),
                expected: expected_version,
                actual,
            });
        }

        Ok(document)
    }

    async fn health_check(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}
