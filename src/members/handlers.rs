use axum::{extract::State, routing::get, Json, Router};
use tracing::{instrument, warn};

use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    members::repo_types::MemberProfile,
    state::AppState,
};

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(member_id): AuthUser,
) -> AppResult<Json<MemberProfile>> {
    let profile = state.members.profile(member_id).await?.ok_or_else(|| {
        warn!(%member_id, "member profile not found");
        AppError::NotFound("member".into())
    })?;
    Ok(Json(profile))
}
