//! Store-layer error handling
//!
//! Engine validation errors pass through untransformed; conflicts,
//! missing documents, and adapter failures get their own variants.

use fitquest_core::EngineError;
use thiserror::Error;

/// Store error type covering engines, documents, and adapters
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Version conflict on {key}: expected {expected}, found {actual}")]
    VersionConflict {
        key: String,
        expected: u64,
        actual: u64,
    },

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("Redis error")]
    Redis(#[from] redis::RedisError),

    #[error("Internal store error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
