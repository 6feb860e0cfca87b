//! Gamification document repository

use super::Snapshot;
use crate::adapter::PersistenceAdapter;
use crate::error::StoreResult;
use fitquest_core::UserGamification;
use uuid::Uuid;

/// Repository for `gamification/{userId}` documents
pub struct GamificationRepository;

impl GamificationRepository {
    fn key(user_id: Uuid) -> String {
        format!("gamification/{}", user_id)
    }

    /// Load a user's aggregate, or None for a first-time user
    ///
    /// Callers treat None as a clean default aggregate, never an error.
    pub async fn load(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
    ) -> StoreResult<Option<Snapshot<UserGamification>>> {
        let Some(doc) = store.get(&Self::key(user_id)).await? else {
            return Ok(None);
        };
        Ok(Some(Snapshot {
            data: serde_json::from_value(doc.body)?,
            version: doc.version,
            updated_at: doc.updated_at,
        }))
    }

    /// Save an aggregate against the version previously read
    pub async fn save(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
        state: &UserGamification,
        expected_version: u64,
    ) -> StoreResult<Snapshot<UserGamification>> {
        let doc = store
            .put(
                &Self::key(user_id),
                serde_json::to_value(state)?,
                expected_version,
            )
            .await?;
        Ok(Snapshot {
            data: state.clone(),
            version: doc.version,
            updated_at: doc.updated_at,
        })
    }
}
