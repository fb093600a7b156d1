use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::{MealSlot, NutritionInfo};

#[derive(Debug, FromRow)]
pub struct FoodRecordRow {
    pub id: Uuid,
    pub member_id: Uuid,
    pub food_name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub meal_slot: Option<String>,
    pub recorded_at: OffsetDateTime,
}

/// One confirmed food item. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: Uuid,
    pub member_id: Uuid,
    pub food_name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    /// `None` for items logged outside the three meals.
    pub meal_slot: Option<MealSlot>,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl FoodRecord {
    pub fn nutrition(&self) -> NutritionInfo {
        NutritionInfo::new(
            self.calories.unwrap_or(0.0),
            self.carbohydrates.unwrap_or(0.0),
            self.protein.unwrap_or(0.0),
            self.fat.unwrap_or(0.0),
        )
    }
}

impl From<FoodRecordRow> for FoodRecord {
    fn from(r: FoodRecordRow) -> Self {
        Self {
            id: r.id,
            member_id: r.member_id,
            food_name: r.food_name,
            calories: r.calories,
            protein: r.protein,
            fat: r.fat,
            carbohydrates: r.carbohydrates,
            // unknown values ("none", legacy labels) are unslotted
            meal_slot: r.meal_slot.and_then(|s| s.parse().ok()),
            recorded_at: r.recorded_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewFoodRecord {
    pub member_id: Uuid,
    pub food_name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub meal_slot: Option<MealSlot>,
    pub recorded_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn row_with_unknown_slot_is_unslotted() {
        let row = FoodRecordRow {
            id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            food_name: "apple".into(),
            calories: Some(95.0),
            protein: None,
            fat: None,
            carbohydrates: Some(25.0),
            meal_slot: Some("none".into()),
            recorded_at: datetime!(2024-05-01 15:00 UTC),
        };
        let record = FoodRecord::from(row);
        assert_eq!(record.meal_slot, None);
        assert_eq!(record.nutrition(), NutritionInfo::new(95.0, 25.0, 0.0, 0.0));
    }
}
