//! Gamification service - daily logging actions over the adapter
//!
//! Every public operation maps to a short event list, applied to the
//! freshest aggregate snapshot and saved with compare-and-swap. On a
//! version conflict the events are replayed over the newer snapshot
//! rather than overwriting it, so two near-simultaneous logs both land.

use super::MAX_WRITE_ATTEMPTS;
use crate::adapter::PersistenceAdapter;
use crate::error::{StoreError, StoreResult};
use crate::repositories::GamificationRepository;
use fitquest_core::{GamificationEvent, UserGamification};
use tracing::{debug, warn};
use uuid::Uuid;

/// Gamification service for business logic
pub struct GamificationService;

impl GamificationService {
    /// Log a meal for a date (also advances the day's streak)
    pub async fn log_meal(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
        date: &str,
        meal_id: &str,
        calories: f64,
    ) -> StoreResult<UserGamification> {
        let events = [
            GamificationEvent::LoginRecorded {
                date: date.to_string(),
            },
            GamificationEvent::MealLogged {
                date: date.to_string(),
                meal_id: meal_id.to_string(),
                calories,
            },
        ];
        Self::apply_events(store, user_id, &events).await
    }

    /// Mark a date's calorie goal as completed (also advances the streak)
    pub async fn complete_daily_goal(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
        date: &str,
    ) -> StoreResult<UserGamification> {
        let events = [
            GamificationEvent::LoginRecorded {
                date: date.to_string(),
            },
            GamificationEvent::DailyGoalCompleted {
                date: date.to_string(),
            },
        ];
        Self::apply_events(store, user_id, &events).await
    }

    /// Record a bare login for streak purposes
    pub async fn record_login(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
        date: &str,
    ) -> StoreResult<UserGamification> {
        let events = [GamificationEvent::LoginRecorded {
            date: date.to_string(),
        }];
        Self::apply_events(store, user_id, &events).await
    }

    /// Current aggregate state (a clean default for first-time users)
    pub async fn overview(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
    ) -> StoreResult<UserGamification> {
        Ok(GamificationRepository::load(store, user_id)
            .await?
            .map(|snapshot| snapshot.data)
            .unwrap_or_default())
    }

    /// Apply events to the freshest snapshot, retrying on write conflicts
    ///
    /// Engine validation errors abort immediately; only version
    /// conflicts are retried, by reloading and replaying.
    pub(crate) async fn apply_events(
        store: &dyn PersistenceAdapter,
        user_id: Uuid,
        events: &[GamificationEvent],
    ) -> StoreResult<UserGamification> {
        let mut attempt = 1;
        loop {
            let snapshot = GamificationRepository::load(store, user_id).await?;
            let (mut state, version) = match snapshot {
                Some(snapshot) => (snapshot.data, snapshot.version),
                None => (UserGamification::default(), 0),
            };

            for event in events {
                state.apply(event)?;
            }

            match GamificationRepository::save(store, user_id, &state, version).await {
                Ok(saved) => {
                    debug!(%user_id, version = saved.version, "gamification state saved");
                    return Ok(saved.data);
                }
                Err(StoreError::VersionConflict { key, actual, .. })
                    if attempt < MAX_WRITE_ATTEMPTS =>
                {
                    warn!(
                        %key,
                        actual,
                        attempt,
                        "write conflict, replaying events over fresh snapshot"
                    );
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
