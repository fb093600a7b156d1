use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::foods::repo_types::FoodRecord;
use crate::nutrition::slots::{MealSlot, SlotPresence};

/// Calories and macros of a meal, a day or a recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fat: f64,
}

impl NutritionInfo {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(calories: f64, carbohydrates: f64, protein: f64, fat: f64) -> Self {
        Self {
            calories,
            carbohydrates,
            protein,
            fat,
        }
    }

    /// Every field multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.calories * factor,
            self.carbohydrates * factor,
            self.protein * factor,
            self.fat * factor,
        )
    }

    /// Sum of a list of food records; absent fields count as zero.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FoodRecord>,
    {
        records.into_iter().map(FoodRecord::nutrition).sum()
    }
}

impl Add for NutritionInfo {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.calories + rhs.calories,
            self.carbohydrates + rhs.carbohydrates,
            self.protein + rhs.protein,
            self.fat + rhs.fat,
        )
    }
}

impl AddAssign for NutritionInfo {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionInfo {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// A day's food records split by meal slot. Records without a slot are kept
/// aside: they count toward the day's intake but not toward slot presence.
#[derive(Debug, Clone, Default)]
pub struct SlotBuckets {
    pub breakfast: Vec<FoodRecord>,
    pub lunch: Vec<FoodRecord>,
    pub dinner: Vec<FoodRecord>,
    pub unslotted: Vec<FoodRecord>,
}

impl SlotBuckets {
    pub fn partition(records: impl IntoIterator<Item = FoodRecord>) -> Self {
        let mut buckets = Self::default();
        for record in records {
            match record.meal_slot {
                Some(MealSlot::Breakfast) => buckets.breakfast.push(record),
                Some(MealSlot::Lunch) => buckets.lunch.push(record),
                Some(MealSlot::Dinner) => buckets.dinner.push(record),
                None => buckets.unslotted.push(record),
            }
        }
        buckets
    }

    pub fn slot(&self, slot: MealSlot) -> &[FoodRecord] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn presence(&self) -> SlotPresence {
        SlotPresence {
            breakfast: !self.breakfast.is_empty(),
            lunch: !self.lunch.is_empty(),
            dinner: !self.dinner.is_empty(),
        }
    }

    pub fn slot_nutrition(&self, slot: MealSlot) -> NutritionInfo {
        NutritionInfo::from_records(self.slot(slot))
    }

    /// Everything eaten, slotted or not.
    pub fn total(&self) -> NutritionInfo {
        NutritionInfo::from_records(
            self.breakfast
                .iter()
                .chain(&self.lunch)
                .chain(&self.dinner)
                .chain(&self.unslotted),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn record(slot: Option<MealSlot>, kcal: Option<f64>, carbs: Option<f64>) -> FoodRecord {
        FoodRecord {
            id: Uuid::new_v4(),
            member_id: Uuid::nil(),
            food_name: "rice".into(),
            calories: kcal,
            protein: Some(2.0),
            fat: None,
            carbohydrates: carbs,
            meal_slot: slot,
            recorded_at: datetime!(2024-05-01 08:00 UTC),
        }
    }

    #[test]
    fn empty_list_is_zero() {
        assert_eq!(
            NutritionInfo::from_records(&Vec::<FoodRecord>::new()),
            NutritionInfo::ZERO
        );
    }

    #[test]
    fn addition_is_commutative_and_associative() {
        let a = NutritionInfo::new(100.0, 10.0, 5.0, 2.0);
        let b = NutritionInfo::new(250.5, 30.0, 12.5, 8.0);
        let c = NutritionInfo::new(12.0, 0.5, 0.25, 1.0);
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
    }

    #[test]
    fn missing_fields_count_as_zero() {
        let records = vec![
            record(Some(MealSlot::Breakfast), Some(300.0), Some(40.0)),
            record(Some(MealSlot::Breakfast), None, None),
        ];
        let sum = NutritionInfo::from_records(&records);
        assert_eq!(sum, NutritionInfo::new(300.0, 40.0, 4.0, 0.0));
    }

    #[test]
    fn partition_groups_by_slot() {
        let buckets = SlotBuckets::partition(vec![
            record(Some(MealSlot::Lunch), Some(500.0), Some(60.0)),
            record(Some(MealSlot::Dinner), Some(700.0), Some(80.0)),
            record(Some(MealSlot::Lunch), Some(100.0), Some(10.0)),
            record(None, Some(50.0), None),
        ]);

        assert!(buckets.breakfast.is_empty());
        assert_eq!(buckets.lunch.len(), 2);
        assert_eq!(buckets.dinner.len(), 1);
        assert_eq!(buckets.unslotted.len(), 1);

        let presence = buckets.presence();
        assert!(!presence.breakfast && presence.lunch && presence.dinner);

        assert_eq!(buckets.slot_nutrition(MealSlot::Lunch).calories, 600.0);
        assert_eq!(buckets.total().calories, 1350.0);
    }
}
