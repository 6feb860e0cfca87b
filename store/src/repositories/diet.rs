//! Diet document repository

use super::Snapshot;
use crate::adapter::PersistenceAdapter;
use crate::error::StoreResult;
use fitquest_core::{NutritionTargets, WeeklyDiet};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of a `diet/{userId}` document
///
/// The weekly plan travels with the targets it was generated from; the
/// envelope's `updated_at` doubles as the plan's generation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietDocument {
    pub targets: NutritionTargets,
    pub week: WeeklyDiet,
}

/// Repository for `diet/{userId}` documents
pub struct DietRepository;

impl DietRepository {
    fn key(user_id: Uuid) -> String {
        format!("diet/{}", user_id)
    }

    /// Load a user's plan, or None if no plan was ever generated
    pub async fn load(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
    ) -> StoreResult<Option<Snapshot<DietDocument>>> {
        let Some(doc) = store.get(&Self::key(user_id)).await? else {
            return Ok(None);
        };
        Ok(Some(Snapshot {
            data: serde_json::from_value(doc.body)?,
            version: doc.version,
            updated_at: doc.updated_at,
        }))
    }

    /// Save a plan against the version previously read
    pub async fn save(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
        document: &DietDocument,
        expected_version: u64,
    ) -> StoreResult<Snapshot<DietDocument>> {
        let doc = store
            .put(
                &Self::key(user_id),
                serde_json::to_value(document)?,
                expected_version,
            )
            .await?;
        Ok(Snapshot {
            data: document.clone(),
            version: doc.version,
            updated_at: doc.updated_at,
        })
    }
}
