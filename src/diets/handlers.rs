use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    dates::{parse_date, today},
    error::{AppError, AppResult},
    members::MetricsOverride,
    state::AppState,
};

use super::dto::{CalendarQuery, CalendarResponse, DaySummary, Recommendation, SaveDietRequest};
use super::repo_types::{DietPatch, DietRecord};
use super::services;

pub fn diet_routes() -> Router<AppState> {
    Router::new()
        .route("/diet/today", get(get_today))
        .route("/diet/recommend-next", post(recommend_next))
        .route("/diets", post(save_diet))
}

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/records/calendar", get(get_calendar))
        .route("/records/:date", get(get_record))
}

#[instrument(skip(state))]
pub async fn get_today(
    State(state): State<AppState>,
    AuthUser(member_id): AuthUser,
) -> AppResult<Json<DaySummary>> {
    Ok(Json(services::day_summary(&state, member_id).await?))
}

/// An empty body means no overrides; a malformed one is rejected.
fn parse_overrides(body: &[u8]) -> AppResult<MetricsOverride> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MetricsOverride::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("invalid body: {e}")))
}

/// Body is optional; its sex/height/weight override the stored profile.
#[instrument(skip(state, body))]
pub async fn recommend_next(
    State(state): State<AppState>,
    AuthUser(member_id): AuthUser,
    body: Bytes,
) -> AppResult<Json<Recommendation>> {
    let overrides = parse_overrides(&body)?;
    let rec = services::recommend_next_meal(&state, member_id, &overrides).await?;
    Ok(Json(rec))
}

#[instrument(skip(state, body))]
pub async fn save_diet(
    State(state): State<AppState>,
    AuthUser(member_id): AuthUser,
    Json(body): Json<SaveDietRequest>,
) -> AppResult<Json<DietRecord>> {
    let date = parse_date(&body.diet_date)?;
    let patch = DietPatch {
        breakfast: body.breakfast,
        lunch: body.lunch,
        dinner: body.dinner,
    };
    let record = services::save_meal_choice(&state, member_id, date, &patch).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn get_calendar(
    State(state): State<AppState>,
    AuthUser(member_id): AuthUser,
    Query(q): Query<CalendarQuery>,
) -> AppResult<Json<CalendarResponse>> {
    let now = today(state.config.utc_offset);
    let year = q.year.unwrap_or(now.year());
    let month = q.month.unwrap_or(u8::from(now.month()));
    let calendar = services::get_calendar_summary(&state, member_id, q.page, q.size).await?;
    Ok(Json(CalendarResponse::new(
        calendar,
        q.page,
        q.size.max(1),
        year,
        month,
    )))
}

#[instrument(skip(state))]
pub async fn get_record(
    State(state): State<AppState>,
    AuthUser(member_id): AuthUser,
    Path(date): Path<String>,
) -> AppResult<Json<DietRecord>> {
    let date = parse_date(&date)?;
    Ok(Json(services::record_for_date(&state, member_id, date).await?))
}
