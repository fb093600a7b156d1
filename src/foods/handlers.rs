use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::AuthUser,
    dates::{day_bounds, parse_date, today},
    error::{AppError, AppResult},
    state::AppState,
};

use super::dto::{CreateFoodRequest, DayQuery};
use super::repo_types::{FoodRecord, NewFoodRecord};

pub fn food_routes() -> Router<AppState> {
    Router::new().route("/foods", get(list_foods).post(create_food))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(member_id): AuthUser,
    Json(body): Json<CreateFoodRequest>,
) -> AppResult<(StatusCode, Json<FoodRecord>)> {
    let food_name = body.food_name.trim().to_string();
    if food_name.is_empty() {
        warn!(%member_id, "food without a name");
        return Err(AppError::BadRequest("food_name is required".into()));
    }

    let record = state
        .foods
        .insert(NewFoodRecord {
            member_id,
            food_name,
            calories: body.calories,
            protein: body.protein,
            fat: body.fat,
            carbohydrates: body.carbohydrates,
            meal_slot: body.meal_slot,
            recorded_at: OffsetDateTime::now_utc(),
        })
        .await?;

    info!(%member_id, food_id = %record.id, slot = ?record.meal_slot, "food logged");
    Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    AuthUser(member_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> AppResult<Json<Vec<FoodRecord>>> {
    let offset = state.config.utc_offset;
    let day = match q.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today(offset),
    };
    let (start, end) = day_bounds(day, offset);
    let records = state.foods.list_between(member_id, start, end).await?;
    Ok(Json(records))
}
