mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::{FoodLog, MemoryFoodLog, PgFoodLog};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::food_routes())
}
