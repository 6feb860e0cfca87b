//! User profile types for plan generation
//!
//! The profile is the single validated input to the nutrition planning
//! engine: body metrics, activity level, goal, chosen intensity, and food
//! preferences. All options are closed enums; free-form strings only exist
//! inside food preferences (ingredient include/exclude lists).

use crate::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

// ============================================================================
// Profile Enums
// ============================================================================

/// Biological sex for energy-expenditure calculations
/// Note: This is used for physiological calculations only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            other => Err(format!("Unknown biological sex: {}", other)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtraActive => "Very hard exercise or physical job",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extra_active" => Ok(ActivityLevel::ExtraActive),
            other => Err(format!("Unknown activity level: {}", other)),
        }
    }
}

/// Training goal driving calorie adjustment and macro split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainMuscle,
    Maintain,
    ImproveConditioning,
}

impl Goal {
    /// Sign of the daily caloric adjustment for this goal
    ///
    /// Loss runs a deficit, muscle gain a surplus. Maintenance and
    /// conditioning both eat at maintenance (conditioning recomposes via
    /// the macro split, not via an energy delta).
    pub fn direction(&self) -> f64 {
        match self {
            Goal::LoseWeight => -1.0,
            Goal::GainMuscle => 1.0,
            Goal::Maintain | Goal::ImproveConditioning => 0.0,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose body weight",
            Goal::GainMuscle => "Build muscle mass",
            Goal::Maintain => "Maintain current weight",
            Goal::ImproveConditioning => "Improve conditioning and work capacity",
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "lose_weight" => Ok(Goal::LoseWeight),
            "gain_muscle" => Ok(Goal::GainMuscle),
            "maintain" => Ok(Goal::Maintain),
            "improve_conditioning" => Ok(Goal::ImproveConditioning),
            other => Err(format!("Unknown goal: {}", other)),
        }
    }
}

/// Rate-of-change intensity for the chosen goal
///
/// Each option maps to a fixed weekly rate of bodyweight change; the
/// daily caloric delta is derived from it in the target calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Mild,
    Moderate,
    Aggressive,
}

impl Intensity {
    /// Weekly bodyweight change in kg this intensity targets (unsigned)
    pub fn weekly_kg_change(&self) -> f64 {
        match self {
            Intensity::Mild => 0.25,
            Intensity::Moderate => 0.5,
            Intensity::Aggressive => 1.0,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Intensity::Mild => "About 0.25 kg per week",
            Intensity::Moderate => "About 0.5 kg per week",
            Intensity::Aggressive => "About 1 kg per week",
        }
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mild" => Ok(Intensity::Mild),
            "moderate" => Ok(Intensity::Moderate),
            "aggressive" => Ok(Intensity::Aggressive),
            other => Err(format!("Unknown intensity: {}", other)),
        }
    }
}

/// Dietary restrictions a meal plan must honor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
}

impl FromStr for DietaryRestriction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "vegetarian" => Ok(DietaryRestriction::Vegetarian),
            "vegan" => Ok(DietaryRestriction::Vegan),
            "gluten_free" => Ok(DietaryRestriction::GlutenFree),
            "dairy_free" => Ok(DietaryRestriction::DairyFree),
            other => Err(format!("Unknown dietary restriction: {}", other)),
        }
    }
}

// ============================================================================
// Food Preferences
// ============================================================================

fn default_meals_per_day() -> u8 {
    3
}

/// Food preferences shaping the generated weekly diet
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodPreferences {
    /// How many meals the plan spreads each day's calories across
    #[validate(range(min = 3, max = 5, message = "must be between 3 and 5"))]
    #[serde(default = "default_meals_per_day")]
    pub meals_per_day: u8,
    /// Ingredients the user wants to see more of (soft preference)
    #[serde(default)]
    pub included_items: Vec<String>,
    /// Ingredients that must never appear (hard constraint)
    #[serde(default)]
    pub excluded_items: Vec<String>,
    /// Dietary restrictions every meal must satisfy (hard constraint)
    #[serde(default)]
    pub restrictions: Vec<DietaryRestriction>,
}

impl Default for FoodPreferences {
    fn default() -> Self {
        Self {
            meals_per_day: default_meals_per_day(),
            included_items: Vec::new(),
            excluded_items: Vec::new(),
            restrictions: Vec::new(),
        }
    }
}

// ============================================================================
// Profile Model
// ============================================================================

/// Validated representation of a user's metrics, goal, and preferences
///
/// This is the single input to target calculation and diet generation.
/// Ranges reject implausible metrics outright; out-of-range input is an
/// error, never silently clamped.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileModel {
    pub user_id: Uuid,
    pub sex: BiologicalSex,
    /// Age in years
    #[validate(range(min = 13, max = 120, message = "must be between 13 and 120 years"))]
    pub age_years: i32,
    /// Height in centimeters (stored in SI)
    #[validate(range(min = 50.0, max = 300.0, message = "must be between 50 and 300 cm"))]
    pub height_cm: f64,
    /// Current weight in kilograms (stored in SI)
    #[validate(range(min = 20.0, max = 500.0, message = "must be between 20 and 500 kg"))]
    pub weight_kg: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub intensity: Intensity,
    #[validate(nested)]
    #[serde(default)]
    pub preferences: FoodPreferences,
}

impl ProfileModel {
    /// Validate the profile, collapsing all field errors into one message
    pub fn validate(&self) -> Result<(), EngineError> {
        Validate::validate(self)
            .map_err(|e| EngineError::InvalidProfile(describe_validation_errors(&e)))
    }
}

/// Flatten validator errors into a stable "field: message" summary
fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    collect_errors("", errors, &mut parts);
    parts.sort();
    parts.join("; ")
}

fn collect_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(format!("{}: {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}
