//! Daily calorie and macro target calculation
//!
//! Derives NutritionTargets from a validated profile: Mifflin-St Jeor BMR,
//! activity-scaled TDEE, an intensity-derived caloric adjustment, and a
//! goal-dependent macro split that always reconciles with the calorie
//! target.

use crate::errors::EngineError;
use crate::profile::{BiologicalSex, Goal, Intensity, ProfileModel};
use serde::{Deserialize, Serialize};

/// Energy content of one gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Energy content of one gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Energy content of one gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Approximate energy content of one kilogram of bodyweight change
pub const KCAL_PER_KG_BODYWEIGHT: f64 = 7700.0;

/// Calorie targets below this are rejected rather than clamped
pub const MIN_DAILY_CALORIES: f64 = 800.0;

/// Tolerance for macro/calorie reconciliation (kcal)
pub const MACRO_RECONCILIATION_TOLERANCE_KCAL: f64 = 5.0;

/// Macro split as fractions of total calories
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroSplit {
    /// Get the canonical macro split for a goal
    pub fn for_goal(goal: Goal) -> Self {
        match goal {
            Goal::LoseWeight => MacroSplit {
                protein: 0.40,
                carbs: 0.30,
                fat: 0.30,
            },
            Goal::GainMuscle => MacroSplit {
                protein: 0.35,
                carbs: 0.40,
                fat: 0.25,
            },
            Goal::Maintain => MacroSplit {
                protein: 0.30,
                carbs: 0.40,
                fat: 0.30,
            },
            Goal::ImproveConditioning => MacroSplit {
                protein: 0.25,
                carbs: 0.55,
                fat: 0.20,
            },
        }
    }
}

/// Daily calorie and macro targets derived from a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Daily calorie target (kcal)
    pub calories: f64,
    /// Daily protein target (grams)
    pub protein_g: f64,
    /// Daily carbohydrate target (grams)
    pub carbs_g: f64,
    /// Daily fat target (grams)
    pub fat_g: f64,
    /// Basal metabolic rate the target was derived from
    pub bmr: f64,
    /// Maintenance energy expenditure the target was derived from
    pub tdee: f64,
}

impl NutritionTargets {
    /// Total calories implied by the macro grams (4/4/9 conversion)
    pub fn macro_calories(&self) -> f64 {
        self.protein_g * KCAL_PER_G_PROTEIN
            + self.carbs_g * KCAL_PER_G_CARBS
            + self.fat_g * KCAL_PER_G_FAT
    }

    /// Daily energy delta relative to maintenance (negative = deficit)
    pub fn daily_delta(&self) -> f64 {
        self.calories - self.tdee
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex: BiologicalSex,
) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Signed daily caloric adjustment for a goal at the chosen intensity
///
/// Each intensity maps to a fixed weekly rate of bodyweight change; the
/// weekly energy equivalent (7700 kcal per kg) is spread over 7 days and
/// signed by the goal direction.
pub fn daily_calorie_delta(goal: Goal, intensity: Intensity) -> f64 {
    goal.direction() * intensity.weekly_kg_change() * KCAL_PER_KG_BODYWEIGHT / 7.0
}

/// Target calculator for daily calorie and macro targets
pub struct TargetCalculator;

impl TargetCalculator {
    /// Derive nutrition targets from a profile
    ///
    /// Rejects invalid profiles and targets that would fall below the
    /// minimum safe calorie floor; never clamps.
    pub fn calculate(profile: &ProfileModel) -> Result<NutritionTargets, EngineError> {
        profile.validate()?;

        let bmr = calculate_bmr_mifflin(
            profile.weight_kg,
            profile.height_cm,
            profile.age_years,
            profile.sex,
        );
        let tdee = bmr * profile.activity_level.multiplier();
        let calories = (tdee + daily_calorie_delta(profile.goal, profile.intensity)).round();

        if calories < MIN_DAILY_CALORIES {
            return Err(EngineError::InvalidProfile(format!(
                "calorie target {:.0} kcal is below the {:.0} kcal minimum; choose a milder intensity",
                calories, MIN_DAILY_CALORIES
            )));
        }

        let split = MacroSplit::for_goal(profile.goal);
        let protein_g = (calories * split.protein / KCAL_PER_G_PROTEIN).round();
        let carbs_g = (calories * split.carbs / KCAL_PER_G_CARBS).round();
        // Fat takes the remaining calories so the grams always reconcile
        // with the calorie target within rounding.
        let remaining =
            calories - protein_g * KCAL_PER_G_PROTEIN - carbs_g * KCAL_PER_G_CARBS;
        let fat_g = (remaining / KCAL_PER_G_FAT).round();

        Ok(NutritionTargets {
            calories,
            protein_g,
            carbs_g,
            fat_g,
            bmr,
            tdee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ActivityLevel, FoodPreferences};
    use proptest::prelude::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn profile(goal: Goal, intensity: Intensity) -> ProfileModel {
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

    #[test]
    fn test_bmr_mifflin() {
        // 30yo male, 80kg, 180cm -> BMR ~1780
        let bmr = calculate_bmr_mifflin(80.0, 180.0, 30, BiologicalSex::Male);
        assert!((bmr - 1780.0).abs() < 50.0);

        // 30yo female, 60kg, 165cm -> BMR ~1370
        let bmr = calculate_bmr_mifflin(60.0, 165.0, 30, BiologicalSex::Female);
        assert!((bmr - 1370.0).abs() < 50.0);
    }

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.1);
    }

    #[rstest]
    #[case(Goal::LoseWeight, Intensity::Mild, -275.0)]
    #[case(Goal::LoseWeight, Intensity::Moderate, -550.0)]
    #[case(Goal::LoseWeight, Intensity::Aggressive, -1100.0)]
    #[case(Goal::GainMuscle, Intensity::Moderate, 550.0)]
    #[case(Goal::Maintain, Intensity::Aggressive, 0.0)]
    #[case(Goal::ImproveConditioning, Intensity::Moderate, 0.0)]
    fn test_daily_calorie_delta(
        #[case] goal: Goal,
        #[case] intensity: Intensity,
        #[case] expected: f64,
    ) {
        assert!((daily_calorie_delta(goal, intensity) - expected).abs() < 0.01);
    }

    #[test]
    fn test_moderate_loss_target_below_maintenance() {
        // 80kg, lose weight at 0.5 kg/week -> ~550 kcal/day
        // below maintenance.
        let targets = TargetCalculator::calculate(&profile(Goal::LoseWeight, Intensity::Moderate))
            .unwrap();
        assert!((targets.daily_delta() - (-550.0)).abs() < 1.0);
        assert!(targets.calories < targets.tdee);
    }

    #[test]
    fn test_maintenance_target_equals_tdee() {
        let targets =
            TargetCalculator::calculate(&profile(Goal::Maintain, Intensity::Moderate)).unwrap();
        assert!((targets.calories - targets.tdee.round()).abs() < 1.0);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut p = profile(Goal::LoseWeight, Intensity::Moderate);
        p.weight_kg = -5.0;
        assert!(matches!(
            TargetCalculator::calculate(&p),
            Err(EngineError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_target_below_floor_rejected() {
        // Small, sedentary profile with an aggressive deficit lands below
        // the 800 kcal floor.
        let mut p = profile(Goal::LoseWeight, Intensity::Aggressive);
        p.sex = BiologicalSex::Female;
        p.weight_kg = 40.0;
        p.height_cm = 150.0;
        p.age_years = 60;
        p.activity_level = ActivityLevel::Sedentary;
        let err = TargetCalculator::calculate(&p).unwrap_err();
        assert!(err.to_string().contains("minimum"));
    }

    #[test]
    fn test_conditioning_split_favors_carbs() {
        let targets =
            TargetCalculator::calculate(&profile(Goal::ImproveConditioning, Intensity::Mild))
                .unwrap();
        assert!(targets.carbs_g > targets.protein_g);
        assert!(targets.carbs_g > targets.fat_g);
    }

    #[test]
    fn test_muscle_gain_runs_surplus_with_high_protein() {
        let targets =
            TargetCalculator::calculate(&profile(Goal::GainMuscle, Intensity::Moderate)).unwrap();
        assert!(targets.calories > targets.tdee);
        // 0.35 protein fraction at 4 kcal/g beats 0.25 fat fraction at 9
        assert!(targets.protein_g > targets.fat_g);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: macro grams always reconcile with the calorie target
        #[test]
        fn prop_macros_reconcile_with_calories(
            weight in 45.0f64..200.0,
            height in 140.0f64..210.0,
            age in 18i32..80,
            goal_idx in 0usize..4,
            intensity_idx in 0usize..3
        ) {
            let goals = [Goal::LoseWeight, Goal::GainMuscle, Goal::Maintain, Goal::ImproveConditioning];
            let intensities = [Intensity::Mild, Intensity::Moderate, Intensity::Aggressive];
            let mut p = profile(goals[goal_idx], intensities[intensity_idx]);
            p.weight_kg = weight;
            p.height_cm = height;
            p.age_years = age;

            if let Ok(targets) = TargetCalculator::calculate(&p) {
                let diff = (targets.macro_calories() - targets.calories).abs();
                prop_assert!(diff <= MACRO_RECONCILIATION_TOLERANCE_KCAL,
                    "Reconciliation off by {} kcal for {:?}", diff, targets);
            }
        }

        /// Property: a loss target is below maintenance, a gain target above
        #[test]
        fn prop_delta_sign_matches_goal(
            weight in 60.0f64..150.0,
            intensity_idx in 0usize..3
        ) {
            let intensities = [Intensity::Mild, Intensity::Moderate, Intensity::Aggressive];
            let mut lose = profile(Goal::LoseWeight, intensities[intensity_idx]);
            lose.weight_kg = weight;
            let mut gain = profile(Goal::GainMuscle, intensities[intensity_idx]);
            gain.weight_kg = weight;

            let lose_t = TargetCalculator::calculate(&lose).unwrap();
            let gain_t = TargetCalculator::calculate(&gain).unwrap();
            prop_assert!(lose_t.calories < lose_t.tdee);
            prop_assert!(gain_t.calories > gain_t.tdee);
        }
    }
}
