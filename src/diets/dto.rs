use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates::{format_date, iso_date};
use crate::diets::repo_types::{DietRecord, SlotPatch};
use crate::foods::repo_types::FoodRecord;
use crate::nutrition::{MealSlot, MenuItem, NutritionInfo, NutritionRequirement};

#[derive(Debug, Serialize)]
pub struct Recommendation {
    pub meal_slot: MealSlot,
    #[serde(with = "iso_date")]
    pub target_date: Date,
    pub day_of_week: String,
    pub menu: Vec<MenuItem>,
    /// Item names joined with ", ", ready to be saved as a diet record slot.
    pub menu_text: String,
    /// Sum of the menu items.
    pub totals: NutritionInfo,
    /// Target the menu was built for.
    pub goal: NutritionInfo,
    pub daily_requirement: NutritionRequirement,
    /// Logged plus assumed intake.
    pub consumed_total: NutritionInfo,
    pub rationale: String,
    pub exceeded: bool,
    /// Comment from the external advisor, when one is configured and answered.
    pub advice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlotSummary {
    pub items: Vec<FoodRecord>,
    pub nutrition: NutritionInfo,
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub day_of_week: String,
    pub breakfast: SlotSummary,
    pub lunch: SlotSummary,
    pub dinner: SlotSummary,
    pub unslotted: Vec<FoodRecord>,
    pub total: NutritionInfo,
}

#[derive(Debug, Deserialize)]
pub struct SaveDietRequest {
    pub diet_date: String,
    #[serde(default)]
    pub breakfast: SlotPatch,
    #[serde(default)]
    pub lunch: SlotPatch,
    #[serde(default)]
    pub dinner: SlotPatch,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
    pub year: Option<i32>,
    pub month: Option<u8>,
}

fn default_size() -> usize {
    10
}

/// Calendar totals for every saved date plus one page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarSummary {
    pub summary: BTreeMap<Date, f64>,
    pub records: Vec<DietRecord>,
    pub total_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub summary: BTreeMap<String, f64>,
    pub records: Vec<DietRecord>,
    pub page: usize,
    pub size: usize,
    pub total_pages: usize,
    pub year: i32,
    pub month: u8,
}

impl CalendarResponse {
    pub fn new(calendar: CalendarSummary, page: usize, size: usize, year: i32, month: u8) -> Self {
        Self {
            summary: calendar
                .summary
                .into_iter()
                .map(|(date, kcal)| (format_date(date), kcal))
                .collect(),
            records: calendar.records,
            page,
            size,
            total_pages: calendar.total_pages,
            year,
            month,
        }
    }
}
