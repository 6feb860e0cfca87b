//! FitQuest Store Library
//!
//! Persistence contract and orchestration for the FitQuest engines: a
//! versioned key-value document adapter (in-memory and Redis), typed
//! per-aggregate repositories, and the services that run each
//! user-triggered action as one load-compute-save cycle.

pub mod adapter;
pub mod config;
pub mod error;
pub mod repositories;
pub mod services;

// Re-export commonly used items
pub use adapter::{open, MemoryStore, PersistenceAdapter, RedisStore, StoredDocument};
pub use config::{StoreBackend, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use repositories::{DietDocument, Snapshot};
pub use services::{GamificationService, GeneratedPlan, PlanService};
