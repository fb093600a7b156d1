use serde::Serialize;

use crate::nutrition::aggregate::NutritionInfo;
use crate::nutrition::requirement::NutritionRequirement;
use crate::nutrition::slots::MealSlot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(flatten)]
    pub nutrition: NutritionInfo,
}

/// (name, calorie share, carbohydrate share, protein share, fat share)
type Share = (&'static str, f64, f64, f64, f64);

const BREAKFAST: [Share; 4] = [
    ("Brown rice", 0.40, 0.50, 0.20, 0.10),
    ("Steamed egg", 0.30, 0.10, 0.50, 0.40),
    ("Seasoned spinach", 0.20, 0.30, 0.20, 0.30),
    ("Kimchi", 0.10, 0.10, 0.10, 0.20),
];

const LUNCH: [Share; 4] = [
    ("Brown rice", 0.35, 0.40, 0.15, 0.10),
    ("Grilled chicken breast", 0.40, 0.05, 0.60, 0.30),
    ("Broccoli", 0.15, 0.30, 0.15, 0.20),
    ("Soybean paste soup", 0.10, 0.25, 0.10, 0.40),
];

const DINNER: [Share; 4] = [
    ("Multigrain rice", 0.30, 0.45, 0.15, 0.10),
    ("Grilled salmon", 0.35, 0.02, 0.50, 0.40),
    ("Roasted vegetables", 0.25, 0.40, 0.20, 0.30),
    ("Seaweed soup", 0.10, 0.13, 0.15, 0.20),
];

fn table(slot: MealSlot) -> &'static [Share; 4] {
    match slot {
        MealSlot::Breakfast => &BREAKFAST,
        MealSlot::Lunch => &LUNCH,
        MealSlot::Dinner => &DINNER,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Fixed four-item menu for `slot`, each item a share of `target`.
pub fn generate_menu(target: &NutritionInfo, slot: MealSlot) -> Vec<MenuItem> {
    table(slot)
        .iter()
        .map(|&(name, kcal, carbs, protein, fat)| MenuItem {
            name: name.to_string(),
            nutrition: NutritionInfo::new(
                round1(target.calories * kcal),
                round1(target.carbohydrates * carbs),
                round1(target.protein * protein),
                round1(target.fat * fat),
            ),
        })
        .collect()
}

pub fn menu_totals(items: &[MenuItem]) -> NutritionInfo {
    items.iter().map(|item| item.nutrition).sum()
}

/// Item names joined the way diet records store them.
pub fn menu_text(items: &[MenuItem]) -> String {
    items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Plain-language explanation of a recommendation.
pub fn rationale(
    daily: &NutritionRequirement,
    consumed: &NutritionInfo,
    recommended: &NutritionInfo,
    exceeded: bool,
    slot: MealSlot,
) -> String {
    if exceeded {
        format!(
            "You have eaten more than your daily recommendation. A lighter {slot} is recommended next. \
             Recommended: {:.0} kcal, eaten so far: {:.0} kcal",
            daily.calories, consumed.calories
        )
    } else {
        let remaining = daily.calories - consumed.calories;
        format!(
            "{:.0} kcal of your daily {:.0} kcal remain, so {:.0} kcal is recommended for {slot}. \
             Carbohydrate, protein and fat are spread evenly for a balanced intake.",
            remaining, daily.calories, recommended.calories
        )
    }
}
