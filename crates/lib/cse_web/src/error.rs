//! Application error types.

use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use cse_core::auth::AuthError;
use cse_core::store::StoreError;
use thiserror::Error;
use tracing::{debug, error};

use crate::views;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Failures that end a request with an error page.
///
/// Recoverable outcomes (validation, bad credentials, zero-row writes) never
/// become an `AppError`; handlers re-render or redirect for those.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "404",
                "Sorry, we appear to have lost that page.",
            ),
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, "Bad Request", m.as_str()),
            AppError::Unavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
                "Sorry, the service is temporarily unavailable. Please try again shortly.",
            ),
            AppError::Internal(detail) => {
                error!(detail = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server Error",
                    "Oh no! There was a crash. Maybe try a different route?",
                )
            }
        };
        (status, Html(views::error_page(title, message))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::NotFound("record not found".into()),
            StoreError::Unavailable(msg) => AppError::Unavailable(msg),
            StoreError::Conflict(msg) | StoreError::Query(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => {
                debug!(error = %e.body_text(), "unusable path parameter");
                AppError::NotFound(e.body_text())
            }
            other => AppError::Internal(other.body_text()),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        debug!(status = %rejection.status(), error = %rejection.body_text(), "form rejected");
        AppError::BadRequest("Sorry, that form submission could not be read.".into())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection.body_text(), "query rejected");
        AppError::BadRequest("Sorry, that search could not be read.".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_detail() {
        let response =
            AppError::Internal("relation \"inventory\" does not exist".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_map_to_distinct_statuses() {
        let unavailable = AppError::from(StoreError::Unavailable("pool timed out".into()));
        assert_eq!(
            unavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let missing = AppError::from(StoreError::NotFound);
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }
}
