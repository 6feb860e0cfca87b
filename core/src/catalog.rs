//! Meal catalog - the pluggable source of candidate meals
//!
//! The diet generator selects from whatever catalog it is handed; the
//! default catalog is a static template table. Swapping in a recipe
//! database or a remote food API only requires implementing `MealCatalog`.

use crate::profile::DietaryRestriction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-of-day slot a meal occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
}

impl MealSlot {
    /// Canonical time-of-day label for this slot
    pub fn time_label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "08:00",
            MealSlot::MorningSnack => "10:30",
            MealSlot::Lunch => "13:00",
            MealSlot::AfternoonSnack => "16:30",
            MealSlot::Dinner => "19:30",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::MorningSnack => "Morning Snack",
            MealSlot::Lunch => "Lunch",
            MealSlot::AfternoonSnack => "Afternoon Snack",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A candidate meal the catalog can offer for a slot
///
/// Templates carry no portion size; the generator scales each selection
/// to its slot's calorie share.
#[derive(Debug, Clone, Serialize)]
pub struct MealTemplate {
    pub name: &'static str,
    /// Slots this template can fill
    pub slots: &'static [MealSlot],
    /// Ingredient tags used for preference and exclusion matching
    pub ingredients: &'static [&'static str],
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
}

impl MealTemplate {
    /// Whether this template satisfies a dietary restriction
    pub fn allows(&self, restriction: DietaryRestriction) -> bool {
        match restriction {
            DietaryRestriction::Vegetarian => self.vegetarian,
            DietaryRestriction::Vegan => self.vegan,
            DietaryRestriction::GlutenFree => self.gluten_free,
            DietaryRestriction::DairyFree => self.dairy_free,
        }
    }

    /// Case-insensitive ingredient-tag match
    pub fn contains_ingredient(&self, item: &str) -> bool {
        let needle = item.to_lowercase();
        self.ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase() == needle)
    }
}

/// Source of candidate meals for the diet generator
pub trait MealCatalog {
    /// Candidate templates able to fill the given slot
    fn candidates(&self, slot: MealSlot) -> Vec<&MealTemplate>;
}

const BREAKFAST: &[MealSlot] = &[MealSlot::Breakfast];
const SNACK: &[MealSlot] = &[MealSlot::MorningSnack, MealSlot::AfternoonSnack];
const LUNCH: &[MealSlot] = &[MealSlot::Lunch];
const DINNER: &[MealSlot] = &[MealSlot::Dinner];
const LUNCH_OR_DINNER: &[MealSlot] = &[MealSlot::Lunch, MealSlot::Dinner];

/// Built-in meal template table
static DEFAULT_TEMPLATES: &[MealTemplate] = &[
    // Breakfasts
    MealTemplate {
        name: "Oatmeal with Berries and Nuts",
        slots: BREAKFAST,
        ingredients: &["oats", "berries", "walnuts", "milk"],
        vegetarian: true,
        vegan: false,
        gluten_free: false,
        dairy_free: false,
    },
    MealTemplate {
        name: "Scrambled Eggs on Toast",
        slots: BREAKFAST,
        ingredients: &["eggs", "bread", "butter"],
        vegetarian: true,
        vegan: false,
        gluten_free: false,
        dairy_free: false,
    },
    MealTemplate {
        name: "Greek Yogurt Parfait",
        slots: BREAKFAST,
        ingredients: &["yogurt", "granola", "honey", "berries"],
        vegetarian: true,
        vegan: false,
        gluten_free: false,
        dairy_free: false,
    },
    MealTemplate {
        name: "Tofu Scramble with Spinach",
        slots: BREAKFAST,
        ingredients: &["tofu", "spinach", "tomato", "olive oil"],
        vegetarian: true,
        vegan: true,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Banana Peanut Smoothie",
        slots: BREAKFAST,
        ingredients: &["banana", "peanut butter", "oat milk"],
        vegetarian: true,
        vegan: true,
        gluten_free: true,
        dairy_free: true,
    },
    // Lunches
    MealTemplate {
        name: "Grilled Chicken Salad",
        slots: LUNCH,
        ingredients: &["chicken", "lettuce", "tomato", "olive oil"],
        vegetarian: false,
        vegan: false,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Tuna and Quinoa Bowl",
        slots: LUNCH,
        ingredients: &["tuna", "quinoa", "cucumber", "lemon"],
        vegetarian: false,
        vegan: false,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Turkey and Avocado Wrap",
        slots: LUNCH,
        ingredients: &["turkey", "avocado", "tortilla", "lettuce"],
        vegetarian: false,
        vegan: false,
        gluten_free: false,
        dairy_free: true,
    },
    MealTemplate {
        name: "Chickpea Buddha Bowl",
        slots: LUNCH_OR_DINNER,
        ingredients: &["chickpeas", "rice", "broccoli", "tahini"],
        vegetarian: true,
        vegan: true,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Lentil Soup with Vegetables",
        slots: LUNCH_OR_DINNER,
        ingredients: &["lentils", "carrot", "celery", "onion"],
        vegetarian: true,
        vegan: true,
        gluten_free: true,
        dairy_free: true,
    },
    // Dinners
    MealTemplate {
        name: "Baked Salmon with Sweet Potato",
        slots: DINNER,
        ingredients: &["salmon", "sweet potato", "asparagus"],
        vegetarian: false,
        vegan: false,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Lean Beef Stir-Fry",
        slots: DINNER,
        ingredients: &["beef", "rice", "bell pepper", "soy sauce"],
        vegetarian: false,
        vegan: false,
        gluten_free: false,
        dairy_free: true,
    },
    MealTemplate {
        name: "Chicken and Brown Rice",
        slots: DINNER,
        ingredients: &["chicken", "brown rice", "green beans"],
        vegetarian: false,
        vegan: false,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Tofu Vegetable Curry",
        slots: DINNER,
        ingredients: &["tofu", "coconut milk", "rice", "curry"],
        vegetarian: true,
        vegan: true,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Pasta with Tomato and Basil",
        slots: DINNER,
        ingredients: &["pasta", "tomato", "basil", "olive oil"],
        vegetarian: true,
        vegan: true,
        gluten_free: false,
        dairy_free: true,
    },
    // Snacks
    MealTemplate {
        name: "Apple with Peanut Butter",
        slots: SNACK,
        ingredients: &["apple", "peanut butter"],
        vegetarian: true,
        vegan: true,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Cottage Cheese with Pineapple",
        slots: SNACK,
        ingredients: &["cottage cheese", "pineapple"],
        vegetarian: true,
        vegan: false,
        gluten_free: true,
        dairy_free: false,
    },
    MealTemplate {
        name: "Trail Mix",
        slots: SNACK,
        ingredients: &["almonds", "raisins", "cashews"],
        vegetarian: true,
        vegan: true,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Hummus with Carrot Sticks",
        slots: SNACK,
        ingredients: &["hummus", "carrot"],
        vegetarian: true,
        vegan: true,
        gluten_free: true,
        dairy_free: true,
    },
    MealTemplate {
        name: "Protein Shake",
        slots: SNACK,
        ingredients: &["whey protein", "milk", "banana"],
        vegetarian: true,
        vegan: false,
        gluten_free: true,
        dairy_free: false,
    },
];

/// Static built-in catalog used when no custom catalog is injected
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMealCatalog;

impl MealCatalog for DefaultMealCatalog {
    fn candidates(&self, slot: MealSlot) -> Vec<&MealTemplate> {
        DEFAULT_TEMPLATES
            .iter()
            .filter(|template| template.slots.contains(&slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MealSlot::Breakfast)]
    #[case(MealSlot::MorningSnack)]
    #[case(MealSlot::Lunch)]
    #[case(MealSlot::AfternoonSnack)]
    #[case(MealSlot::Dinner)]
    fn test_every_slot_has_candidates(#[case] slot: MealSlot) {
        assert!(!DefaultMealCatalog.candidates(slot).is_empty());
    }

    #[rstest]
    #[case(MealSlot::Breakfast)]
    #[case(MealSlot::MorningSnack)]
    #[case(MealSlot::Lunch)]
    #[case(MealSlot::AfternoonSnack)]
    #[case(MealSlot::Dinner)]
    fn test_every_slot_has_a_vegan_option(#[case] slot: MealSlot) {
        // The built-in table must be able to serve the strictest
        // restriction for every slot.
        assert!(DefaultMealCatalog
            .candidates(slot)
            .iter()
            .any(|t| t.vegan && t.gluten_free && t.dairy_free));
    }

    #[test]
    fn test_vegan_templates_are_vegetarian_and_dairy_free() {
        for template in DEFAULT_TEMPLATES {
            if template.vegan {
                assert!(template.vegetarian, "{} vegan but not vegetarian", template.name);
                assert!(template.dairy_free, "{} vegan but not dairy-free", template.name);
            }
        }
    }

    #[test]
    fn test_ingredient_match_is_case_insensitive() {
        let template = &DEFAULT_TEMPLATES[0];
        assert!(template.contains_ingredient("OATS"));
        assert!(template.contains_ingredient("Oats"));
        assert!(!template.contains_ingredient("oat")); // tag match, not substring
    }

    #[test]
    fn test_allows_maps_restriction_flags() {
        let curry = DEFAULT_TEMPLATES
            .iter()
            .find(|t| t.name == "Tofu Vegetable Curry")
            .unwrap();
        assert!(curry.allows(DietaryRestriction::Vegan));
        assert!(curry.allows(DietaryRestriction::GlutenFree));

        let parfait = DEFAULT_TEMPLATES
            .iter()
            .find(|t| t.name == "Greek Yogurt Parfait")
            .unwrap();
        assert!(!parfait.allows(DietaryRestriction::DairyFree));
    }

    #[test]
    fn test_slot_time_labels_are_ordered() {
        let slots = [
            MealSlot::Breakfast,
            MealSlot::MorningSnack,
            MealSlot::Lunch,
            MealSlot::AfternoonSnack,
            MealSlot::Dinner,
        ];
        for pair in slots.windows(2) {
            assert!(pair[0].time_label() < pair[1].time_label());
        }
    }
}
