//! Plan service - profile intake and nutrition plan orchestration
//!
//! One call takes a submitted profile through target calculation,
//! weight projection, and weekly diet generation, persists the profile
//! and diet documents, and feeds the resulting activity events to the
//! gamification aggregate.

use super::{GamificationService, MAX_WRITE_ATTEMPTS};
use crate::adapter::PersistenceAdapter;
use crate::error::{StoreError, StoreResult};
use crate::repositories::{
    DietDocument, DietRepository, ProfileRepository, Snapshot,
};
use chrono::NaiveDate;
use fitquest_core::{
    DailyDiet, DayOfWeek, DefaultMealCatalog, DietPlanGenerator, GamificationEvent,
    NutritionTargets, ProfileModel, ProjectionEngine, ProjectionTarget, TargetCalculator,
    WeeklyDiet, WeightProjection,
};
use tracing::info;

/// Everything one plan generation produces
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub targets: NutritionTargets,
    pub projection: WeightProjection,
    pub week: WeeklyDiet,
}

/// Plan service for business logic
pub struct PlanService;

impl PlanService {
    /// Create a full nutrition plan from a submitted profile
    ///
    /// Validation errors from the engines surface untransformed. The
    /// profile and diet documents are persisted; a first-time profile
    /// save additionally emits ProfileCompleted.
    pub async fn create_plan(
        store: &dyn PersistenceAdapter,
        profile: &ProfileModel,
        target: ProjectionTarget,
        start_date: NaiveDate,
    ) -> StoreResult<GeneratedPlan> {
        let targets = TargetCalculator::calculate(profile)?;
        let projection = ProjectionEngine::project(
            profile.weight_kg,
            profile.goal,
            profile.intensity,
            target,
            start_date,
        );
        let week =
            DietPlanGenerator::generate(&targets, &profile.preferences, &DefaultMealCatalog);

        let first_profile = Self::save_profile(store, profile).await?;
        Self::save_diet(
            store,
            profile,
            DietDocument {
                targets: targets.clone(),
                week: week.clone(),
            },
        )
        .await?;

        let mut events = vec![GamificationEvent::DietCreated {
            daily_calorie_target: targets.calories,
        }];
        if first_profile {
            events.push(GamificationEvent::ProfileCompleted);
        }
        GamificationService::apply_events(store, profile.user_id, &events).await?;

        info!(
            user_id = %profile.user_id,
            calories = targets.calories,
            complete = projection.complete,
            "nutrition plan created"
        );

        Ok(GeneratedPlan {
            targets,
            projection,
            week,
        })
    }

    /// Load the stored plan, or None if no plan was ever generated
    pub async fn get_plan(
        store: &dyn PersistenceAdapter,
        user_id: uuid::Uuid,
    ) -> StoreResult<Option<Snapshot<DietDocument>>> {
        DietRepository::load(store, user_id).await
    }

    /// Regenerate a single day of the stored plan
    ///
    /// Days are independent given the same targets, so only the
    /// requested day changes; the refreshed document is saved with
    /// compare-and-swap like every other write.
    pub async fn regenerate_day(
        store: &dyn PersistenceAdapter,
        user_id: uuid::Uuid,
        day: DayOfWeek,
    ) -> StoreResult<DailyDiet> {
        let profile = ProfileRepository::load(store, user_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("profile/{}", user_id)))?
            .data;

        let mut attempt = 1;
        loop {
            let snapshot = DietRepository::load(store, user_id)
                .await?
                .ok_or_else(|| StoreError::NotFound(format!("diet/{}", user_id)))?;

            let mut document = snapshot.data;
            let regenerated = DietPlanGenerator::generate_day(
                &document.targets,
                &profile.preferences,
                &DefaultMealCatalog,
                day.index(),
            );
            document.week.days.insert(day, regenerated.clone());

            match DietRepository::save(store, user_id, &document, snapshot.version).await {
                Ok(_) => return Ok(regenerated),
                Err(StoreError::VersionConflict { .. }) if attempt < MAX_WRITE_ATTEMPTS => {
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Save the profile document; returns true when it is the first save
    async fn save_profile(
        store: &dyn PersistenceAdapter,
        profile: &ProfileModel,
    ) -> StoreResult<bool> {
        let mut attempt = 1;
        loop {
            let existing = ProfileRepository::load(store, profile.user_id).await?;
            let first = existing.is_none();
            let version = existing.map(|s| s.version).unwrap_or(0);
            match ProfileRepository::save(store, profile, version).await {
                Ok(_) => return Ok(first),
                Err(StoreError::VersionConflict { .. }) if attempt < MAX_WRITE_ATTEMPTS => {
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn save_diet(
        store: &dyn PersistenceAdapter,
        profile: &ProfileModel,
        document: DietDocument,
    ) -> StoreResult<()> {
        let mut attempt = 1;
        loop {
            let version = DietRepository::load(store, profile.user_id)
                .await?
                .map(|s| s.version)
                .unwrap_or(0);
            match DietRepository::save(store, profile.user_id, &document, version).await {
                Ok(_) => return Ok(()),
                Err(StoreError::VersionConflict { .. }) if attempt < MAX_WRITE_ATTEMPTS => {
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
