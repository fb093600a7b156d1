use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use crate::dates::{age_on, iso_date};
use crate::error::{AppError, AppResult};
use crate::nutrition::{BodyMetrics, Sex};

/// Member profile as stored by member management. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MemberProfile {
    pub id: Uuid,
    pub name: Option<String>,
    pub sex: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(with = "iso_date::option")]
    pub birth_date: Option<Date>,
}

/// Request-time values that take precedence over the stored profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsOverride {
    pub sex: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl MemberProfile {
    /// Body metrics for the requirement calculator. Sex, height and weight
    /// are mandatory; age is left `None` when the birth date is unknown.
    pub fn body_metrics(&self, overrides: &MetricsOverride, today: Date) -> AppResult<BodyMetrics> {
        let present = |s: &&str| !s.trim().is_empty();
        let sex = overrides
            .sex
            .as_deref()
            .filter(present)
            .or(self.sex.as_deref().filter(present))
            .ok_or_else(|| AppError::ProfileIncomplete("sex is missing".into()))?;
        let height_cm = overrides
            .height_cm
            .or(self.height_cm)
            .ok_or_else(|| AppError::ProfileIncomplete("height is missing".into()))?;
        let weight_kg = overrides
            .weight_kg
            .or(self.weight_kg)
            .ok_or_else(|| AppError::ProfileIncomplete("weight is missing".into()))?;

        Ok(BodyMetrics {
            sex: Sex::normalize(sex),
            height_cm,
            weight_kg,
            age: self.birth_date.and_then(|birth| age_on(birth, today)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn profile() -> MemberProfile {
        MemberProfile {
            id: Uuid::new_v4(),
            name: Some("Jiwoo".into()),
            sex: Some("남".into()),
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            birth_date: Some(date!(2000 - 01 - 20)),
        }
    }

    #[test]
    fn metrics_from_profile() {
        let m = profile()
            .body_metrics(&MetricsOverride::default(), date!(2024 - 01 - 19))
            .unwrap();
        assert_eq!(m.sex, Sex::Male);
        assert_eq!(m.height_cm, 175.0);
        assert_eq!(m.age, Some(23));
    }

    #[test]
    fn overrides_win() {
        let overrides = MetricsOverride {
            sex: Some("female".into()),
            height_cm: None,
            weight_kg: Some(60.0),
        };
        let m = profile().body_metrics(&overrides, date!(2024 - 05 - 01)).unwrap();
        assert_eq!(m.sex, Sex::Female);
        assert_eq!(m.height_cm, 175.0);
        assert_eq!(m.weight_kg, 60.0);
    }

    #[test]
    fn blank_sex_override_falls_back_to_profile() {
        let overrides = MetricsOverride {
            sex: Some("  ".into()),
            ..MetricsOverride::default()
        };
        let mut p = profile();
        p.sex = Some("male".into());
        let m = p.body_metrics(&overrides, date!(2024 - 05 - 01)).unwrap();
        assert_eq!(m.sex, Sex::Male);

        p.sex = Some("".into());
        let err = p.body_metrics(&overrides, date!(2024 - 05 - 01)).unwrap_err();
        assert!(matches!(err, AppError::ProfileIncomplete(_)));
    }

    #[test]
    fn missing_height_is_rejected_but_missing_birth_date_is_not() {
        let mut p = profile();
        p.birth_date = None;
        let m = p
            .body_metrics(&MetricsOverride::default(), date!(2024 - 05 - 01))
            .unwrap();
        assert_eq!(m.age, None);

        p.height_cm = None;
        let err = p
            .body_metrics(&MetricsOverride::default(), date!(2024 - 05 - 01))
            .unwrap_err();
        assert!(matches!(err, AppError::ProfileIncomplete(_)));
    }

    #[test]
    fn profile_serializes_iso_birth_date() {
        let json = serde_json::to_value(profile()).unwrap();
        assert_eq!(json["birth_date"], "2000-01-20");
    }
}
