use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Sex, height or weight missing from both the request and the profile.
    #[error("profile incomplete: {0}")]
    ProfileIncomplete(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Another save for the same member and date won the race.
    #[error("concurrent update conflict")]
    ConcurrentUpdateConflict,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ProfileIncomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidDate(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ConcurrentUpdateConflict => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps lock or serialization failures to a conflict, the rest to `Database`.
    pub fn from_upsert(e: sqlx::Error) -> Self {
        let conflict = e
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == "40001" || code == "40P01");
        if conflict {
            Self::ConcurrentUpdateConflict
        } else {
            Self::Database(e)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Database(e) => {
                error!(error = %e, "database error");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::ProfileIncomplete("height".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InvalidDate("2024-13-01".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ConcurrentUpdateConflict.status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_database_upsert_errors_stay_database() {
        assert!(matches!(
            AppError::from_upsert(sqlx::Error::PoolTimedOut),
            AppError::Database(_)
        ));
    }
}
