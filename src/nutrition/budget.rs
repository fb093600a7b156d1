use serde::{Deserialize, Serialize};

use crate::nutrition::aggregate::NutritionInfo;
use crate::nutrition::requirement::NutritionRequirement;
use crate::nutrition::slots::{MealSlot, SlotPresence};

/// Tunables of the remaining-budget heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetParams {
    /// Share of the daily requirement assumed eaten at an unlogged breakfast.
    pub breakfast_share: f64,
    pub lunch_share: f64,
    pub dinner_share: f64,
    /// Consumed calories above `daily * exceeded_ratio` mark the day as exceeded.
    pub exceeded_ratio: f64,
    /// Lower bound for every field of the next-meal target.
    pub floor: NutritionInfo,
}

impl Default for BudgetParams {
    fn default() -> Self {
        Self {
            breakfast_share: 0.25,
            lunch_share: 0.40,
            dinner_share: 0.35,
            exceeded_ratio: 1.1,
            floor: NutritionInfo::new(200.0, 20.0, 10.0, 5.0),
        }
    }
}

impl BudgetParams {
    pub fn share(&self, slot: MealSlot) -> f64 {
        match slot {
            MealSlot::Breakfast => self.breakfast_share,
            MealSlot::Lunch => self.lunch_share,
            MealSlot::Dinner => self.dinner_share,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Allocation {
    pub next_meal_requirement: NutritionInfo,
    pub total_consumed: NutritionInfo,
    pub exceeded: bool,
}

/// Estimated intake for slots that were skipped in the log and are already
/// behind us (absent and not the slot being recommended).
pub fn assumed_consumption(
    daily: &NutritionRequirement,
    presence: SlotPresence,
    next: MealSlot,
    params: &BudgetParams,
) -> NutritionInfo {
    MealSlot::ALL
        .into_iter()
        .filter(|&slot| !presence.has(slot) && slot != next)
        .map(|slot| daily.as_info().scaled(params.share(slot)))
        .sum()
}

fn remaining(target: f64, consumed: f64, floor: f64) -> f64 {
    (target - consumed).max(0.0).max(floor)
}

/// `daily - consumed` per field, never below the floors.
pub fn next_meal_requirement(
    daily: &NutritionRequirement,
    consumed: &NutritionInfo,
    floor: &NutritionInfo,
) -> NutritionInfo {
    NutritionInfo::new(
        remaining(daily.calories, consumed.calories, floor.calories),
        remaining(daily.carbohydrates, consumed.carbohydrates, floor.carbohydrates),
        remaining(daily.protein, consumed.protein, floor.protein),
        remaining(daily.fat, consumed.fat, floor.fat),
    )
}

pub fn is_exceeded(consumed: &NutritionInfo, daily: &NutritionRequirement, ratio: f64) -> bool {
    consumed.calories > daily.calories * ratio
}

/// Combines real intake with the assumed intake of skipped slots and derives
/// the target for `next`.
pub fn allocate(
    daily: &NutritionRequirement,
    consumed: &NutritionInfo,
    presence: SlotPresence,
    next: MealSlot,
    params: &BudgetParams,
) -> Allocation {
    let total_consumed = *consumed + assumed_consumption(daily, presence, next, params);
    Allocation {
        next_meal_requirement: next_meal_requirement(daily, &total_consumed, &params.floor),
        total_consumed,
        exceeded: is_exceeded(&total_consumed, daily, params.exceeded_ratio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY: NutritionRequirement = NutritionRequirement {
        calories: 2000.0,
        carbohydrates: 250.0,
        protein: 125.0,
        fat: 55.0,
    };

    fn presence(breakfast: bool, lunch: bool, dinner: bool) -> SlotPresence {
        SlotPresence {
            breakfast,
            lunch,
            dinner,
        }
    }

    #[test]
    fn skipped_breakfast_is_assumed_before_dinner() {
        // lunch logged, breakfast skipped, dinner is next
        let assumed = assumed_consumption(
            &DAILY,
            presence(false, true, false),
            MealSlot::Dinner,
            &BudgetParams::default(),
        );
        assert_eq!(assumed, DAILY.as_info().scaled(0.25));
    }

    #[test]
    fn next_slot_is_never_assumed() {
        let assumed = assumed_consumption(
            &DAILY,
            SlotPresence::default(),
            MealSlot::Breakfast,
            &BudgetParams::default(),
        );
        let expected = DAILY.as_info().scaled(0.40) + DAILY.as_info().scaled(0.35);
        assert!((assumed.calories - expected.calories).abs() < 1e-9);
        assert!((assumed.fat - expected.fat).abs() < 1e-9);
    }

    #[test]
    fn logged_slots_contribute_nothing_assumed() {
        let assumed = assumed_consumption(
            &DAILY,
            presence(true, true, false),
            MealSlot::Dinner,
            &BudgetParams::default(),
        );
        assert_eq!(assumed, NutritionInfo::ZERO);
    }

    #[test]
    fn remaining_budget_is_daily_minus_consumed() {
        let consumed = NutritionInfo::new(1200.0, 150.0, 60.0, 30.0);
        let alloc = allocate(
            &DAILY,
            &consumed,
            presence(true, true, false),
            MealSlot::Dinner,
            &BudgetParams::default(),
        );
        assert_eq!(
            alloc.next_meal_requirement,
            NutritionInfo::new(800.0, 100.0, 65.0, 25.0)
        );
        assert_eq!(alloc.total_consumed, consumed);
        assert!(!alloc.exceeded);
    }

    #[test]
    fn remaining_never_drops_below_floors() {
        let params = BudgetParams::default();
        let cases = [
            NutritionInfo::ZERO,
            NutritionInfo::new(1990.0, 245.0, 120.0, 54.0),
            NutritionInfo::new(5000.0, 900.0, 400.0, 300.0),
            NutritionInfo::new(-100.0, -5.0, 0.0, 1e9),
        ];
        for consumed in cases {
            for next in MealSlot::ALL {
                let alloc = allocate(&DAILY, &consumed, presence(true, false, false), next, &params);
                let r = alloc.next_meal_requirement;
                assert!(r.calories >= 200.0, "{r:?}");
                assert!(r.carbohydrates >= 20.0, "{r:?}");
                assert!(r.protein >= 10.0, "{r:?}");
                assert!(r.fat >= 5.0, "{r:?}");
            }
        }
    }

    #[test]
    fn exceeded_boundary_is_strict() {
        let at_limit = NutritionInfo::new(2200.0, 0.0, 0.0, 0.0);
        let over = NutritionInfo::new(2200.5, 0.0, 0.0, 0.0);
        assert!(!is_exceeded(&at_limit, &DAILY, 1.1));
        assert!(is_exceeded(&over, &DAILY, 1.1));
    }

    #[test]
    fn assumed_intake_can_trigger_exceeded() {
        // heavy dinner only: breakfast and lunch unlogged, next is tomorrow's breakfast
        let logged = presence(false, false, true);
        let next = crate::nutrition::slots::next_meal(logged);
        assert_eq!(next.slot, MealSlot::Breakfast);
        assert!(next.next_day);

        let consumed = NutritionInfo::new(1500.0, 0.0, 0.0, 0.0);
        let alloc = allocate(&DAILY, &consumed, logged, next.slot, &BudgetParams::default());
        // 1500 + 40% of 2000
        assert_eq!(alloc.total_consumed.calories, 2300.0);
        assert!(alloc.exceeded);
    }
}
