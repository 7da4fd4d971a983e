//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Wire format for every error response: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    NotFound { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "not_found",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Message exposed to the caller; internal errors carry their source chain.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound { message } => message.clone(),
            AppError::Internal(e) => format!("{:#}", e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                error_code = self.code(),
                status_code = status.as_u16(),
                error = %message,
                "request error"
            );
        } else {
            tracing::info!(
                error_id = %error_id,
                error_code = self.code(),
                status_code = status.as_u16(),
                "request error"
            );
        }

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_flat_body() {
        let response = AppError::not_found("Book not found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, ErrorBody::new("Book not found"));
    }

    #[tokio::test]
    async fn internal_error_maps_to_500_and_exposes_message() {
        let error = AppError::Internal(anyhow::anyhow!("connection refused"));
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await.error, "connection refused");
    }

    #[test]
    fn internal_message_includes_source_chain() {
        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("operation timed out"));
        let error = AppError::from(inner.context("error sending request").unwrap_err());

        assert_eq!(error.message(), "error sending request: operation timed out");
    }

    #[test]
    fn error_body_serializes_with_single_error_key() {
        let value = serde_json::to_value(ErrorBody::new("boom")).unwrap();
        assert_eq!(value, serde_json::json!({"error": "boom"}));
    }
}
