//! FitQuest Core Library
//!
//! Pure calculation engines for the FitQuest fitness tracker: nutrition
//! planning (targets, weight projection, weekly diet generation) and
//! gamification progression (XP, levels, streaks, achievements). No I/O
//! and no async; persistence and orchestration live in `fitquest-store`.

pub mod achievements;
pub mod catalog;
pub mod diet;
pub mod errors;
pub mod gamification;
pub mod leveling;
pub mod profile;
pub mod projection;
pub mod targets;
pub mod units;

// Re-export commonly used items
pub use errors::EngineError;
pub use profile::{
    ActivityLevel, BiologicalSex, DietaryRestriction, FoodPreferences, Goal, Intensity,
    ProfileModel,
};
pub use targets::{NutritionTargets, TargetCalculator};
pub use projection::{ProjectionEngine, ProjectionTarget, WeightProjection};
pub use catalog::{DefaultMealCatalog, MealCatalog, MealSlot};
pub use diet::{DailyDiet, DayOfWeek, DietPlanGenerator, Meal, WeeklyDiet};
pub use gamification::{GamificationEvent, StreakData, UserGamification};
pub use leveling::{calculate_level, xp_required_for_level, LevelState};
