pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{DietStore, MemoryDietStore, PgDietStore};
pub use repo_types::{DietPatch, DietRecord, SlotPatch};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::diet_routes())
        .merge(handlers::record_routes())
}
