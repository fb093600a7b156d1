use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dates::iso_date;
use crate::nutrition::MealSlot;

/// A member's saved menu for one calendar date. At most one per
/// (member, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DietRecord {
    pub id: Uuid,
    pub member_id: Uuid,
    #[serde(with = "iso_date")]
    pub diet_date: Date,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    pub breakfast_kcal: Option<f64>,
    pub breakfast_carbs: Option<f64>,
    pub breakfast_protein: Option<f64>,
    pub breakfast_fat: Option<f64>,
    pub lunch_kcal: Option<f64>,
    pub lunch_carbs: Option<f64>,
    pub lunch_protein: Option<f64>,
    pub lunch_fat: Option<f64>,
    pub dinner_kcal: Option<f64>,
    pub dinner_carbs: Option<f64>,
    pub dinner_protein: Option<f64>,
    pub dinner_fat: Option<f64>,
    pub total_kcal: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Incoming values for one slot; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotPatch {
    pub menu: Option<String>,
    pub kcal: Option<f64>,
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DietPatch {
    #[serde(default)]
    pub breakfast: SlotPatch,
    #[serde(default)]
    pub lunch: SlotPatch,
    #[serde(default)]
    pub dinner: SlotPatch,
}

impl DietPatch {
    pub fn slot(&self, slot: MealSlot) -> &SlotPatch {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }
}

/// Appends `incoming` to `existing` with ", ". Empty sides are skipped, so
/// repeated saves only ever add items.
pub fn merge_menu(existing: Option<&str>, incoming: Option<&str>) -> Option<String> {
    let existing = existing.filter(|s| !s.is_empty());
    let incoming = incoming.filter(|s| !s.is_empty());
    match (existing, incoming) {
        (Some(old), Some(new)) => Some(format!("{old}, {new}")),
        (Some(old), None) => Some(old.to_string()),
        (None, Some(new)) => Some(new.to_string()),
        (None, None) => None,
    }
}

fn overwrite(field: &mut Option<f64>, incoming: Option<f64>) {
    if incoming.is_some() {
        *field = incoming;
    }
}

struct SlotFields<'a> {
    menu: &'a mut Option<String>,
    kcal: &'a mut Option<f64>,
    carbs: &'a mut Option<f64>,
    protein: &'a mut Option<f64>,
    fat: &'a mut Option<f64>,
}

impl DietRecord {
    /// Empty record for a date not saved before.
    pub fn new(member_id: Uuid, diet_date: Date, created_at: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            diet_date,
            breakfast: None,
            lunch: None,
            dinner: None,
            breakfast_kcal: None,
            breakfast_carbs: None,
            breakfast_protein: None,
            breakfast_fat: None,
            lunch_kcal: None,
            lunch_carbs: None,
            lunch_protein: None,
            lunch_fat: None,
            dinner_kcal: None,
            dinner_carbs: None,
            dinner_protein: None,
            dinner_fat: None,
            total_kcal: None,
            created_at,
        }
    }

    fn slot_fields(&mut self, slot: MealSlot) -> SlotFields<'_> {
        match slot {
            MealSlot::Breakfast => SlotFields {
                menu: &mut self.breakfast,
                kcal: &mut self.breakfast_kcal,
                carbs: &mut self.breakfast_carbs,
                protein: &mut self.breakfast_protein,
                fat: &mut self.breakfast_fat,
            },
            MealSlot::Lunch => SlotFields {
                menu: &mut self.lunch,
                kcal: &mut self.lunch_kcal,
                carbs: &mut self.lunch_carbs,
                protein: &mut self.lunch_protein,
                fat: &mut self.lunch_fat,
            },
            MealSlot::Dinner => SlotFields {
                menu: &mut self.dinner,
                kcal: &mut self.dinner_kcal,
                carbs: &mut self.dinner_carbs,
                protein: &mut self.dinner_protein,
                fat: &mut self.dinner_fat,
            },
        }
    }

    /// Menu text is appended, numbers are overwritten when supplied, and the
    /// daily total is recomputed from the three slot calories.
    pub fn apply(&mut self, patch: &DietPatch) {
        for slot in MealSlot::ALL {
            let incoming = patch.slot(slot);
            let fields = self.slot_fields(slot);
            *fields.menu = merge_menu(fields.menu.as_deref(), incoming.menu.as_deref());
            overwrite(fields.kcal, incoming.kcal);
            overwrite(fields.carbs, incoming.carbs);
            overwrite(fields.protein, incoming.protein);
            overwrite(fields.fat, incoming.fat);
        }
        // TODO: revisit whether repeated saves should accumulate calories like menu text does
        self.total_kcal = Some(
            self.breakfast_kcal.unwrap_or(0.0)
                + self.lunch_kcal.unwrap_or(0.0)
                + self.dinner_kcal.unwrap_or(0.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn record() -> DietRecord {
        DietRecord::new(
            Uuid::new_v4(),
            date!(2024 - 05 - 01),
            datetime!(2024-05-01 09:00 UTC),
        )
    }

    fn lunch(menu: Option<&str>, kcal: Option<f64>) -> DietPatch {
        DietPatch {
            lunch: SlotPatch {
                menu: menu.map(str::to_string),
                kcal,
                ..SlotPatch::default()
            },
            ..DietPatch::default()
        }
    }

    #[test]
    fn merge_menu_cases() {
        assert_eq!(merge_menu(None, Some("A")), Some("A".into()));
        assert_eq!(merge_menu(Some(""), Some("A")), Some("A".into()));
        assert_eq!(merge_menu(Some("A"), None), Some("A".into()));
        assert_eq!(merge_menu(Some("A"), Some("")), Some("A".into()));
        assert_eq!(merge_menu(Some("A"), Some("B")), Some("A, B".into()));
        assert_eq!(merge_menu(None, None), None);
    }

    #[test]
    fn menu_text_accumulates() {
        let mut r = record();
        r.apply(&lunch(Some("A"), None));
        r.apply(&lunch(Some("B"), None));
        assert_eq!(r.lunch.as_deref(), Some("A, B"));
        assert_eq!(r.breakfast, None);
    }

    #[test]
    fn numbers_overwrite_only_when_supplied() {
        let mut r = record();
        r.apply(&lunch(None, Some(550.0)));
        assert_eq!(r.lunch_kcal, Some(550.0));
        r.apply(&lunch(None, None));
        assert_eq!(r.lunch_kcal, Some(550.0));
        r.apply(&lunch(None, Some(480.0)));
        assert_eq!(r.lunch_kcal, Some(480.0));
    }

    #[test]
    fn total_is_recomputed_not_accumulated() {
        let mut r = record();
        let mut patch = lunch(Some("Bibimbap"), Some(500.0));
        patch.breakfast.kcal = Some(300.0);
        r.apply(&patch);
        assert_eq!(r.total_kcal, Some(800.0));
        r.apply(&patch);
        assert_eq!(r.total_kcal, Some(800.0));
        assert_eq!(r.lunch.as_deref(), Some("Bibimbap, Bibimbap"));
    }

    #[test]
    fn empty_patch_still_sets_total() {
        let mut r = record();
        r.apply(&DietPatch::default());
        assert_eq!(r.total_kcal, Some(0.0));
    }
}
