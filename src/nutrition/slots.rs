use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown meal slot: {0}")]
pub struct UnknownMealSlot(pub String);

impl FromStr for MealSlot {
    type Err = UnknownMealSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            _ => Err(UnknownMealSlot(s.to_string())),
        }
    }
}

/// Which slots have at least one food record on the reference date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPresence {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

impl SlotPresence {
    pub fn has(self, slot: MealSlot) -> bool {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }
}

/// The slot to recommend next and whether it falls on the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextMeal {
    pub slot: MealSlot,
    pub next_day: bool,
}

impl NextMeal {
    pub fn target_date(self, today: Date) -> Date {
        if self.next_day {
            today.next_day().unwrap_or(today)
        } else {
            today
        }
    }
}

/// Picks the next meal from what has been logged today.
///
/// Rules are evaluated in order and the first match wins; a presence set
/// matching several rules takes the earliest one.
pub fn next_meal(p: SlotPresence) -> NextMeal {
    let (b, l, d) = (p.breakfast, p.lunch, p.dinner);
    let (slot, next_day) = if b && l && d {
        (MealSlot::Breakfast, true)
    } else if b && l && !d {
        (MealSlot::Dinner, false)
    } else if l && d && !b {
        (MealSlot::Breakfast, true)
    } else if b && !l {
        (MealSlot::Lunch, false)
    } else if l && !d {
        (MealSlot::Dinner, false)
    } else if d && !b {
        (MealSlot::Breakfast, true)
    } else if !b && !l && !d {
        (MealSlot::Breakfast, false)
    } else {
        (MealSlot::Lunch, false)
    };
    NextMeal { slot, next_day }
}

/// `DetermineNextMeal`: the next slot and the calendar date it belongs to.
pub fn determine_next_meal(presence: SlotPresence, today: Date) -> (MealSlot, Date) {
    let next = next_meal(presence);
    (next.slot, next.target_date(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn presence(breakfast: bool, lunch: bool, dinner: bool) -> SlotPresence {
        SlotPresence {
            breakfast,
            lunch,
            dinner,
        }
    }

    const TODAY: Date = date!(2024 - 03 - 10);
    const TOMORROW: Date = date!(2024 - 03 - 11);

    #[test]
    fn all_three_logged_moves_to_tomorrow_breakfast() {
        assert_eq!(
            determine_next_meal(presence(true, true, true), TODAY),
            (MealSlot::Breakfast, TOMORROW)
        );
    }

    #[test]
    fn breakfast_and_lunch_gives_dinner() {
        assert_eq!(
            determine_next_meal(presence(true, true, false), TODAY),
            (MealSlot::Dinner, TODAY)
        );
    }

    #[test]
    fn lunch_and_dinner_gives_tomorrow_breakfast() {
        assert_eq!(
            determine_next_meal(presence(false, true, true), TODAY),
            (MealSlot::Breakfast, TOMORROW)
        );
    }

    #[test]
    fn breakfast_only_gives_lunch() {
        assert_eq!(
            determine_next_meal(presence(true, false, false), TODAY),
            (MealSlot::Lunch, TODAY)
        );
    }

    #[test]
    fn breakfast_and_dinner_gives_lunch() {
        assert_eq!(
            determine_next_meal(presence(true, false, true), TODAY),
            (MealSlot::Lunch, TODAY)
        );
    }

    #[test]
    fn lunch_only_gives_dinner() {
        assert_eq!(
            determine_next_meal(presence(false, true, false), TODAY),
            (MealSlot::Dinner, TODAY)
        );
    }

    #[test]
    fn dinner_only_gives_tomorrow_breakfast() {
        assert_eq!(
            determine_next_meal(presence(false, false, true), TODAY),
            (MealSlot::Breakfast, TOMORROW)
        );
    }

    #[test]
    fn nothing_logged_gives_breakfast_today() {
        assert_eq!(
            determine_next_meal(presence(false, false, false), TODAY),
            (MealSlot::Breakfast, TODAY)
        );
    }

    #[test]
    fn next_day_crosses_month_boundary() {
        let (_, date) = determine_next_meal(presence(true, true, true), date!(2024 - 02 - 29));
        assert_eq!(date, date!(2024 - 03 - 01));
    }

    #[test]
    fn slot_parses_case_insensitively() {
        assert_eq!(" Lunch ".parse::<MealSlot>().unwrap(), MealSlot::Lunch);
        assert!("brunch".parse::<MealSlot>().is_err());
    }
}
