//! Profile document repository

use super::Snapshot;
use crate::adapter::PersistenceAdapter;
use crate::error::StoreResult;
use fitquest_core::ProfileModel;
use uuid::Uuid;

/// Repository for `profile/{userId}` documents
pub struct ProfileRepository;

impl ProfileRepository {
    fn key(user_id: Uuid) -> String {
        format!("profile/{}", user_id)
    }

    /// Load a user's profile, or None for a first-time user
    pub async fn load(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
    ) -> StoreResult<Option<Snapshot<ProfileModel>>> {
        let Some(doc) = store.get(&Self::key(user_id)).await? else {
            return Ok(None);
        };
        Ok(Some(Snapshot {
            data: serde_json::from_value(doc.body)?,
            version: doc.version,
            updated_at: doc.updated_at,
        }))
    }

    /// Save a profile against the version previously read
    pub async fn save(
        store: &dyn PersistenceAdapter,
        profile: &ProfileModel,
        expected_version: u64,
    ) -> StoreResult<Snapshot<ProfileModel>> {
        let doc = store
            .put(
                &Self::key(profile.user_id),
                serde_json::to_value(profile)?,
                expected_version,
            )
            .await?;
        Ok(Snapshot {
            data: profile.clone(),
            version: doc.version,
            updated_at: doc.updated_at,
        })
    }
}
