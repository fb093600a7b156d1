pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::{MemberDirectory, MemoryMemberDirectory, PgMemberDirectory};
pub use repo_types::{MemberProfile, MetricsOverride};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::me_routes())
}
