//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::scoring::ScoringError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors (grade table, ranking parameters)
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // Persistence errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Configuration(msg) => AppError::Configuration(msg),
            ScoringError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Resource already exists".to_string())
                } else if db_err.is_foreign_key_violation() {
                    AppError::Validation("Referenced record does not exist".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_errors_keep_their_category() {
        let err: AppError = ScoringError::Validation("missing marks".into()).into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: AppError = ScoringError::Configuration("grade table is empty".into()).into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
