use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Application error taxonomy. Services return this; handlers propagate with `?`
/// and the `IntoResponse` impl picks the status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (non-positive servings, reversed date range, ...)
    #[error("{0}")]
    Validation(String),

    /// Referenced row absent at operation time.
    #[error("{0}")]
    NotFound(String),

    /// The database or an upstream collaborator failed to respond.
    #[error("{0}")]
    Unavailable(String),

    /// Per-user quota exhausted (assistant endpoint).
    #[error("{0}")]
    RateLimited(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("Ressource introuvable".into()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ApiError::Unavailable("Base de données indisponible".into())
            }
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    ApiError::NotFound("Référence introuvable".into())
                }
                sqlx::error::ErrorKind::CheckViolation | sqlx::error::ErrorKind::UniqueViolation => {
                    ApiError::Validation("Données invalides".into())
                }
                _ => ApiError::Internal(sqlx::Error::Database(db).into()),
            },
            other => ApiError::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {self:#}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlx_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        assert_eq!(
            ApiError::validation("servings doit être au moins 1").status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn pool_timeout_maps_to_503() {
        let err: ApiError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
