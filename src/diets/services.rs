use std::collections::BTreeMap;

use time::Date;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::advisor::AdviceRequest;
use crate::dates::{day_bounds, today};
use crate::diets::dto::{CalendarSummary, DaySummary, Recommendation, SlotSummary};
use crate::diets::repo_types::{DietPatch, DietRecord};
use crate::error::{AppError, AppResult};
use crate::foods::repo_types::FoodRecord;
use crate::members::MetricsOverride;
use crate::nutrition::{
    allocate, compute_daily_requirement, generate_menu, menu_text, menu_totals, next_meal,
    rationale, BodyMetrics, MealSlot, NutritionParams, SlotBuckets,
};
use crate::state::AppState;

/// Rule-based recommendation from today's food records. Pure: the advisor
/// is not consulted here.
pub fn recommend(
    metrics: &BodyMetrics,
    todays_records: Vec<FoodRecord>,
    today: Date,
    params: &NutritionParams,
) -> Recommendation {
    let buckets = SlotBuckets::partition(todays_records);
    let presence = buckets.presence();
    let next = next_meal(presence);
    let target_date = next.target_date(today);

    let daily = compute_daily_requirement(metrics, &params.requirement);
    let consumed = buckets.total();
    let alloc = allocate(&daily, &consumed, presence, next.slot, &params.budget);

    let menu = generate_menu(&alloc.next_meal_requirement, next.slot);
    let totals = menu_totals(&menu);
    let reason = rationale(&daily, &alloc.total_consumed, &totals, alloc.exceeded, next.slot);

    Recommendation {
        meal_slot: next.slot,
        target_date,
        day_of_week: target_date.weekday().to_string(),
        menu_text: menu_text(&menu),
        menu,
        totals,
        goal: alloc.next_meal_requirement,
        daily_requirement: daily,
        consumed_total: alloc.total_consumed,
        rationale: reason,
        exceeded: alloc.exceeded,
        advice: None,
    }
}

async fn todays_records(state: &AppState, member_id: Uuid, day: Date) -> AppResult<Vec<FoodRecord>> {
    let (start, end) = day_bounds(day, state.config.utc_offset);
    state.foods.list_between(member_id, start, end).await
}

/// `RecommendNextMeal` for the current member: profile (with request
/// overrides) + today's log, then an optional advisor comment.
pub async fn recommend_next_meal(
    state: &AppState,
    member_id: Uuid,
    overrides: &MetricsOverride,
) -> AppResult<Recommendation> {
    let day = today(state.config.utc_offset);
    let profile = state
        .members
        .profile(member_id)
        .await?
        .ok_or_else(|| AppError::NotFound("member".into()))?;
    let metrics = profile.body_metrics(overrides, day)?;

    let records = todays_records(state, member_id, day).await?;
    let eaten = records
        .iter()
        .map(|r| r.food_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let params = state.config.nutrition;
    let mut rec = recommend(&metrics, records, day, &params);
    info!(
        %member_id,
        slot = %rec.meal_slot,
        target_date = %rec.target_date,
        goal_kcal = rec.goal.calories,
        exceeded = rec.exceeded,
        "next meal recommended"
    );

    if let Some(advisor) = &state.advisor {
        let req = AdviceRequest {
            gender: metrics.sex.as_str().to_string(),
            age: metrics.age.unwrap_or(params.requirement.default_age),
            height_cm: metrics.height_cm,
            weight_kg: metrics.weight_kg,
            activity_level: "light".into(),
            meal_type: rec.meal_slot.to_string(),
            today_meals: eaten,
        };
        match advisor.advise(&req).await {
            Ok(advice) => rec.advice = advice,
            Err(e) => warn!(error = %e, %member_id, "advisor unavailable; serving rule-based menu only"),
        }
    }

    Ok(rec)
}

fn slot_summary(buckets: &SlotBuckets, slot: MealSlot) -> SlotSummary {
    SlotSummary {
        items: buckets.slot(slot).to_vec(),
        nutrition: buckets.slot_nutrition(slot),
    }
}

/// Today's log grouped by slot.
pub async fn day_summary(state: &AppState, member_id: Uuid) -> AppResult<DaySummary> {
    let day = today(state.config.utc_offset);
    let buckets = SlotBuckets::partition(todays_records(state, member_id, day).await?);
    Ok(DaySummary {
        date: day,
        day_of_week: day.weekday().to_string(),
        breakfast: slot_summary(&buckets, MealSlot::Breakfast),
        lunch: slot_summary(&buckets, MealSlot::Lunch),
        dinner: slot_summary(&buckets, MealSlot::Dinner),
        total: buckets.total(),
        unslotted: buckets.unslotted,
    })
}

/// `SaveMealChoice`: merge the fragments into the (member, date) record.
pub async fn save_meal_choice(
    state: &AppState,
    member_id: Uuid,
    date: Date,
    patch: &DietPatch,
) -> AppResult<DietRecord> {
    let record = state.diets.upsert(member_id, date, patch).await?;
    info!(%member_id, %date, total_kcal = ?record.total_kcal, "meal choice saved");
    Ok(record)
}

pub async fn record_for_date(state: &AppState, member_id: Uuid, date: Date) -> AppResult<DietRecord> {
    state
        .diets
        .find(member_id, date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("diet record for {date}")))
}

/// Totals for every record plus the requested page. A `size` of zero is
/// treated as one; pages past the end are empty.
pub fn calendar_summary(records: Vec<DietRecord>, page: usize, size: usize) -> CalendarSummary {
    let size = size.max(1);
    let summary: BTreeMap<Date, f64> = records
        .iter()
        .map(|r| (r.diet_date, r.total_kcal.unwrap_or(0.0)))
        .collect();
    let total_pages = records.len().div_ceil(size);
    let records = records
        .into_iter()
        .skip(page.saturating_mul(size))
        .take(size)
        .collect();
    CalendarSummary {
        summary,
        records,
        total_pages,
    }
}

/// `GetCalendarSummary` for the current member.
pub async fn get_calendar_summary(
    state: &AppState,
    member_id: Uuid,
    page: usize,
    size: usize,
) -> AppResult<CalendarSummary> {
    let records = state.diets.list_by_member(member_id).await?;
    debug!(%member_id, count = records.len(), page, size, "calendar loaded");
    Ok(calendar_summary(records, page, size))
}
