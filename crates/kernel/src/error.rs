//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::content::ContentError;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Invalid or missing access token")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Content(e) => match e {
                ContentError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                ContentError::Forbidden => StatusCode::FORBIDDEN,
                ContentError::NotFound(_) => StatusCode::NOT_FOUND,
                ContentError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Persistence failures are already logged by the resource's failure
        // log; only unexpected internal errors are logged here.
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), "internal server error");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn content_errors_map_to_statuses() {
        let cases = [
            (ContentError::invalid("Invalid data provided"), StatusCode::BAD_REQUEST),
            (ContentError::Forbidden, StatusCode::FORBIDDEN),
            (ContentError::NotFound("Blog post"), StatusCode::NOT_FOUND),
            (
                ContentError::Persistence {
                    operation: "creating",
                    label: "blog post",
                    source: anyhow::anyhow!("disk full"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(AppError::from(error).status(), expected);
        }
    }

    #[test]
    fn content_messages_pass_through() {
        let err = AppError::from(ContentError::NotFound("Blog post"));
        assert_eq!(err.to_string(), "Blog post not found");

        let err = AppError::from(ContentError::Persistence {
            operation: "creating",
            label: "blog post",
            source: anyhow::anyhow!("disk full"),
        });
        assert_eq!(err.to_string(), "Error creating blog post: disk full");
    }

    #[test]
    fn internal_errors_are_vague() {
        let response = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
