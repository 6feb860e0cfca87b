//! Typed per-aggregate document access
//!
//! Repositories translate between domain aggregates and the adapter's
//! JSON envelopes; they own the key scheme and nothing else.

pub mod diet;
pub mod gamification;
pub mod profile;

pub use diet::{DietDocument, DietRepository};
pub use gamification::GamificationRepository;
pub use profile::ProfileRepository;

use chrono::{DateTime, Utc};

/// A loaded aggregate with the version and timestamp of its envelope
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub data: T,
    /// Envelope version to pass back on the next write
    pub version: u64,
    /// Server-assigned write timestamp of the envelope
    pub updated_at: DateTime<Utc>,
}
