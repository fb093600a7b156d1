//! Meal recommendation and nutrition aggregation. Everything here is pure
//! and safe to call concurrently.

pub mod aggregate;
pub mod budget;
pub mod menu;
pub mod requirement;
pub mod slots;

pub use aggregate::{NutritionInfo, SlotBuckets};
pub use budget::{allocate, Allocation, BudgetParams};
pub use menu::{generate_menu, menu_text, menu_totals, rationale, MenuItem};
pub use requirement::{
    compute_daily_requirement, BodyMetrics, NutritionRequirement, RequirementParams, Sex,
};
pub use slots::{determine_next_meal, next_meal, MealSlot, NextMeal, SlotPresence};

use serde::{Deserialize, Serialize};

/// All nutrition tunables, loaded from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionParams {
    pub requirement: RequirementParams,
    pub budget: BudgetParams,
}
