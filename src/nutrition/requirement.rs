use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::nutrition::aggregate::NutritionInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Free-text sex to `Male`/`Female`. Values starting with "m" (any case)
    /// or carrying the Korean male token are male, everything else female.
    pub fn normalize(raw: &str) -> Self {
        lazy_static! {
            static ref MALE_RE: Regex = Regex::new(r"^(?i:m)|남").unwrap();
        }
        if MALE_RE.is_match(raw.trim()) {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Body metrics the requirement is computed from. `age` is `None` when the
/// birth date is unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMetrics {
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequirementParams {
    /// Age used when the birth date is unknown.
    pub default_age: u32,
    /// TDEE multiplier over BMR ("light activity").
    pub activity_factor: f64,
}

impl Default for RequirementParams {
    fn default() -> Self {
        Self {
            default_age: 21,
            activity_factor: 1.375,
        }
    }
}

/// Daily energy and macro targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionRequirement {
    pub calories: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fat: f64,
}

impl NutritionRequirement {
    pub fn as_info(&self) -> NutritionInfo {
        NutritionInfo::new(self.calories, self.carbohydrates, self.protein, self.fat)
    }
}

const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

const CARBS_SHARE: f64 = 0.50;
const PROTEIN_SHARE: f64 = 0.25;
const FAT_SHARE: f64 = 0.25;

/// Mifflin-St Jeor BMR, kcal/day.
pub fn basal_metabolic_rate(metrics: &BodyMetrics, default_age: u32) -> f64 {
    let age = f64::from(metrics.age.unwrap_or(default_age));
    let base = 10.0 * metrics.weight_kg + 6.25 * metrics.height_cm - 5.0 * age;
    match metrics.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// `ComputeDailyRequirement`. Inputs are not validated: nonsensical metrics
/// give nonsensical, but finite, targets.
pub fn compute_daily_requirement(
    metrics: &BodyMetrics,
    params: &RequirementParams,
) -> NutritionRequirement {
    let tdee = basal_metabolic_rate(metrics, params.default_age) * params.activity_factor;
    NutritionRequirement {
        calories: tdee,
        carbohydrates: tdee * CARBS_SHARE / KCAL_PER_G_CARBS,
        protein: tdee * PROTEIN_SHARE / KCAL_PER_G_PROTEIN,
        fat: tdee * FAT_SHARE / KCAL_PER_G_FAT,
    }
}
