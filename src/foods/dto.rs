use serde::Deserialize;

use crate::nutrition::MealSlot;

/// A food item confirmed by the member, e.g. after photo analysis.
#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub food_name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub meal_slot: Option<MealSlot>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
}
