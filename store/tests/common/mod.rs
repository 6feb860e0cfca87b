//! Common test utilities for integration tests
//!
//! All integration tests drive the services against the in-memory
//! adapter, which shares the compare-and-swap contract with the Redis
//! adapter.

use chrono::NaiveDate;
use fake::faker::lorem::en::Word;
use fake::Fake;
use fitquest_core::{
    ActivityLevel, BiologicalSex, FoodPreferences, Goal, Intensity, ProfileModel,
};
use fitquest_store::MemoryStore;
use uuid::Uuid;

/// Fresh in-memory store
pub fn test_store() -> MemoryStore {
    MemoryStore::new()
}

/// Reference profile used across the flow tests: 80 kg, moderate loss
pub fn sample_profile() -> ProfileModel {
    profile_with(Goal::LoseWeight, Intensity::Moderate)
}

pub fn profile_with(goal: Goal, intensity: Intensity) -> ProfileModel {
    ProfileModel {
        user_id: Uuid::new_v4(),
        sex: BiologicalSex::Male,
        age_years: 30,
        height_cm: 180.0,
        weight_kg: 80.0,
        activity_level: ActivityLevel::ModeratelyActive,
        goal,
        intensity,
        preferences: FoodPreferences::default(),
    }
}

/// Generated meal identifier
pub fn meal_id() -> String {
    Word().fake()
}

pub fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}
