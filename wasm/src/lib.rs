//! FitQuest WASM Module
//!
//! WebAssembly bindings over the pure calculators so the PWA shell can
//! compute previews offline before anything is persisted. Everything
//! here delegates to `fitquest-core`; no formula lives in this crate.

use fitquest_core::leveling;
use fitquest_core::profile::{ActivityLevel, BiologicalSex, Goal, Intensity};
use fitquest_core::targets;
use fitquest_core::units::WeightUnit;
use wasm_bindgen::prelude::*;

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    targets::calculate_bmi(weight_kg, height_cm)
}

/// Daily calorie target preview for the given goal and intensity
///
/// Mifflin-St Jeor BMR scaled by activity, adjusted by the intensity's
/// daily caloric delta. String options match the profile enums
/// (`lose_weight`, `moderately_active`, `aggressive`, ...).
#[wasm_bindgen]
pub fn daily_calorie_target(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    is_male: bool,
    activity_level: &str,
    goal: &str,
    intensity: &str,
) -> Result<f64, JsValue> {
    let activity: ActivityLevel = activity_level.parse().map_err(to_js_error)?;
    let goal: Goal = goal.parse().map_err(to_js_error)?;
    let intensity: Intensity = intensity.parse().map_err(to_js_error)?;

    let sex = if is_male {
        BiologicalSex::Male
    } else {
        BiologicalSex::Female
    };
    let bmr = targets::calculate_bmr_mifflin(weight_kg, height_cm, age_years, sex);
    let tdee = bmr * activity.multiplier();
    Ok((tdee + targets::daily_calorie_delta(goal, intensity)).round())
}

/// XP required to advance from `level` to the next
#[wasm_bindgen]
pub fn xp_for_next_level(level: u32) -> f64 {
    leveling::xp_required_for_level(level) as f64
}

/// Level reached at a cumulative XP total
#[wasm_bindgen]
pub fn level_for_xp(total_xp: f64) -> u32 {
    leveling::calculate_level(total_xp.max(0.0) as u64).level
}

/// XP progress within the level reached at a cumulative total
#[wasm_bindgen]
pub fn xp_into_level(total_xp: f64) -> f64 {
    leveling::calculate_level(total_xp.max(0.0) as u64).current_level_xp as f64
}

/// Convert a weight value between display units (kg, lbs, st)
#[wasm_bindgen]
pub fn convert_weight(value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    let from: WeightUnit = from.parse().map_err(to_js_error)?;
    let to: WeightUnit = to.parse().map_err(to_js_error)?;
    Ok(to.from_kg(from.to_kg(value)))
}

fn to_js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.1);
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
    }

    #[test]
    fn test_calorie_target_matches_core_delta() {
        let maintain =
            daily_calorie_target(80.0, 180.0, 30, true, "moderately_active", "maintain", "mild")
                .unwrap();
        let lose = daily_calorie_target(
            80.0,
            180.0,
            30,
            true,
            "moderately_active",
            "lose_weight",
            "moderate",
        )
        .unwrap();
        assert!((maintain - lose - 550.0).abs() < 1.0);
    }

    #[test]
    fn test_unknown_option_is_an_error() {
        assert!(
            daily_calorie_target(80.0, 180.0, 30, true, "couch_potato", "maintain", "mild")
                .is_err()
        );
    }

    #[test]
    fn test_level_helpers_agree() {
        assert_eq!(xp_for_next_level(1), 100.0);
        assert_eq!(level_for_xp(260.0), 3);
        assert_eq!(xp_into_level(260.0), 10.0);
        assert_eq!(level_for_xp(-5.0), 1);
    }

    #[test]
    fn test_weight_conversion_round_trip() {
        let lbs = convert_weight(80.0, "kg", "lbs").unwrap();
        assert!((lbs - 176.37).abs() < 0.01);
        let back = convert_weight(lbs, "lbs", "kg").unwrap();
        assert!((back - 80.0).abs() < 0.0001);
        assert!(convert_weight(1.0, "kg", "furlong").is_err());
    }
}
