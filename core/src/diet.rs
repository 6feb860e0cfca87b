//! Weekly diet plan generation
//!
//! Partitions each day's calorie target across the requested meal slots
//! using canonical proportions, then fills each slot from the meal
//! catalog. Slots whose restrictions cannot be satisfied are flagged as
//! unresolved gaps instead of silently violating a constraint; days are
//! independent given the same targets, so regenerating one day never
//! perturbs the others.

use crate::catalog::{MealCatalog, MealSlot, MealTemplate};
use crate::profile::FoodPreferences;
use crate::targets::{
    NutritionTargets, KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical days of the week, in plan order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All seven days in plan order
    pub fn all() -> [DayOfWeek; 7] {
        [
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
            DayOfWeek::Saturday,
            DayOfWeek::Sunday,
        ]
    }

    /// Zero-based index within the week (Monday = 0)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A planned meal with its macro and calorie contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub slot: MealSlot,
    /// Time-of-day label for the slot
    pub time: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// A slot no catalog candidate could fill under the given constraints
///
/// A flagged gap, not an error: the rest of the day is still planned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnresolvedSlot {
    pub slot: MealSlot,
    /// Calorie share the slot was supposed to carry
    pub calories: f64,
}

/// One day's ordered meal sequence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyDiet {
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub unresolved: Vec<UnresolvedSlot>,
}

impl DailyDiet {
    /// Sum of planned meal calories (unresolved gaps excluded)
    pub fn total_calories(&self) -> f64 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    /// Whether every slot was filled
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Seven keyed daily diets making up a weekly plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyDiet {
    pub days: BTreeMap<DayOfWeek, DailyDiet>,
}

/// Calorie share of each slot for a given meals-per-day setting
fn slot_plan(meals_per_day: u8) -> &'static [(MealSlot, f64)] {
    match meals_per_day {
        4 => &[
            (MealSlot::Breakfast, 0.25),
            (MealSlot::Lunch, 0.35),
            (MealSlot::AfternoonSnack, 0.10),
            (MealSlot::Dinner, 0.30),
        ],
        5 => &[
            (MealSlot::Breakfast, 0.20),
            (MealSlot::MorningSnack, 0.10),
            (MealSlot::Lunch, 0.30),
            (MealSlot::AfternoonSnack, 0.10),
            (MealSlot::Dinner, 0.30),
        ],
        _ => &[
            (MealSlot::Breakfast, 0.30),
            (MealSlot::Lunch, 0.40),
            (MealSlot::Dinner, 0.30),
        ],
    }
}

/// Weekly diet plan generator
pub struct DietPlanGenerator;

impl DietPlanGenerator {
    /// Generate all seven days in one pass
    pub fn generate(
        targets: &NutritionTargets,
        preferences: &FoodPreferences,
        catalog: &impl MealCatalog,
    ) -> WeeklyDiet {
        let days = DayOfWeek::all()
            .into_iter()
            .map(|day| {
                (
                    day,
                    Self::generate_day(targets, preferences, catalog, day.index()),
                )
            })
            .collect();
        WeeklyDiet { days }
    }

    /// Generate a single day's plan
    ///
    /// `day_index` only rotates template selection; the calorie and macro
    /// arithmetic is identical for every day, so one day can be
    /// regenerated without touching the rest of the week.
    pub fn generate_day(
        targets: &NutritionTargets,
        preferences: &FoodPreferences,
        catalog: &impl MealCatalog,
        day_index: usize,
    ) -> DailyDiet {
        let plan = slot_plan(preferences.meals_per_day);
        let mut day = DailyDiet::default();
        let mut allocated = 0.0;

        for (i, &(slot, share)) in plan.iter().enumerate() {
            // The last slot absorbs rounding so the shares sum to the
            // day's target.
            let slot_calories = if i == plan.len() - 1 {
                targets.calories - allocated
            } else {
                (targets.calories * share).round()
            };
            allocated += slot_calories;

            match Self::select_template(catalog, slot, preferences, day_index) {
                Some(template) => {
                    day.meals
                        .push(Self::scale_meal(template, slot, slot_calories, targets));
                }
                None => day.unresolved.push(UnresolvedSlot {
                    slot,
                    calories: slot_calories,
                }),
            }
        }

        day
    }

    /// Pick a template for a slot under the user's constraints
    ///
    /// Hard constraints (exclusions, restrictions) filter; included items
    /// score; the top-scoring group rotates by day index for
    /// deterministic variety.
    fn select_template<'a>(
        catalog: &'a impl MealCatalog,
        slot: MealSlot,
        preferences: &FoodPreferences,
        day_index: usize,
    ) -> Option<&'a MealTemplate> {
        let eligible: Vec<&MealTemplate> = catalog
            .candidates(slot)
            .into_iter()
            .filter(|template| {
                preferences
                    .restrictions
                    .iter()
                    .all(|&restriction| template.allows(restriction))
            })
            .filter(|template| {
                !preferences
                    .excluded_items
                    .iter()
                    .any(|item| template.contains_ingredient(item))
            })
            .collect();

        let best_score = eligible
            .iter()
            .map(|template| Self::preference_score(template, preferences))
            .max()?;

        let top: Vec<&MealTemplate> = eligible
            .into_iter()
            .filter(|template| Self::preference_score(template, preferences) == best_score)
            .collect();

        Some(top[day_index % top.len()])
    }

    fn preference_score(template: &MealTemplate, preferences: &FoodPreferences) -> usize {
        preferences
            .included_items
            .iter()
            .filter(|item| template.contains_ingredient(item))
            .count()
    }

    /// Scale a template to its slot's calorie share
    ///
    /// Macros follow the day's split scaled to the slot fraction; the
    /// meal's stored calories are recomputed from its grams.
    fn scale_meal(
        template: &MealTemplate,
        slot: MealSlot,
        slot_calories: f64,
        targets: &NutritionTargets,
    ) -> Meal {
        let fraction = slot_calories / targets.calories;
        let protein_g = (targets.protein_g * fraction).round();
        let carbs_g = (targets.carbs_g * fraction).round();
        let remaining =
            slot_calories - protein_g * KCAL_PER_G_PROTEIN - carbs_g * KCAL_PER_G_CARBS;
        let fat_g = (remaining / KCAL_PER_G_FAT).round();

        Meal {
            name: template.name.to_string(),
            slot,
            time: slot.time_label().to_string(),
            calories: protein_g * KCAL_PER_G_PROTEIN
                + carbs_g * KCAL_PER_G_CARBS
                + fat_g * KCAL_PER_G_FAT,
            protein_g,
            carbs_g,
            fat_g,
        }
    }
}
