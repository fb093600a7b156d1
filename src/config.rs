use std::str::FromStr;

use time::UtcOffset;

use crate::nutrition::{BudgetParams, NutritionParams, RequirementParams};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

/// External recommendation service. Optional: without it the rule-based menu
/// is served alone.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Offset deciding where "today" starts and ends.
    pub utc_offset: UtcOffset,
    pub nutrition: NutritionParams,
    pub advisor: Option<AdvisorConfig>,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "dietplanner".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "dietplanner-users".into()),
        };

        let utc_offset = UtcOffset::from_hms(env_or("APP_UTC_OFFSET_HOURS", 0i8), 0, 0)?;

        let requirement_defaults = RequirementParams::default();
        let budget_defaults = BudgetParams::default();
        let nutrition = NutritionParams {
            requirement: RequirementParams {
                default_age: env_or("NUTRITION_DEFAULT_AGE", requirement_defaults.default_age),
                activity_factor: env_or(
                    "NUTRITION_ACTIVITY_FACTOR",
                    requirement_defaults.activity_factor,
                ),
            },
            budget: BudgetParams {
                breakfast_share: env_or(
                    "NUTRITION_BREAKFAST_SHARE",
                    budget_defaults.breakfast_share,
                ),
                lunch_share: env_or("NUTRITION_LUNCH_SHARE", budget_defaults.lunch_share),
                dinner_share: env_or("NUTRITION_DINNER_SHARE", budget_defaults.dinner_share),
                exceeded_ratio: env_or("NUTRITION_EXCEEDED_RATIO", budget_defaults.exceeded_ratio),
                floor: budget_defaults.floor,
            },
        };

        let advisor = std::env::var("ADVISOR_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| AdvisorConfig {
                url,
                timeout_secs: env_or("ADVISOR_TIMEOUT_SECS", 5),
            });

        Ok(Self {
            database_url,
            jwt,
            utc_offset,
            nutrition,
            advisor,
        })
    }
}
