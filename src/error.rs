use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// Errors raised by the booking lifecycle.
///
/// Validation variants carry the message shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Please select valid dates and times")]
    InvalidDuration,

    #[error("Please enter a pickup location")]
    MissingPickupLocation,

    #[error("Start date cannot be in the past")]
    StartDateInPast,

    #[error("End date cannot be before the start date")]
    EndDateBeforeStart,

    #[error("Cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("A payment is already being processed")]
    PaymentInProgress,

    #[error("Payment could not be completed")]
    PaymentDeclined,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookingError {
    /// Whether this is a form validation failure that the user can fix.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidDuration
                | BookingError::MissingPickupLocation
                | BookingError::StartDateInPast
                | BookingError::EndDateBeforeStart
        )
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Storage(msg) => AppError::Internal(msg),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}
