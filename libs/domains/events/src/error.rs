//! Event domain errors

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use thiserror::Error;

use crate::status::StatusMessage;

pub type EventResult<T> = Result<T, EventError>;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("{0} is a wrong Event id.")]
    InvalidId(String),

    #[error("Could not find event with id: {0}")]
    NotFound(String),

    /// A business rule rejected the payload
    #[error("{0}")]
    Validation(String),

    /// The caller may not read or remove the event
    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Serialization(format!("BSON serialization error: {err}"))
    }
}

impl From<mongodb::bson::de::Error> for EventError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::Serialization(format!("BSON deserialization error: {err}"))
    }
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl EventError {
    /// Status code for errors rendered as a [`StatusMessage`]; `None` for
    /// infrastructure failures.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::InvalidId(_) | Self::NotFound(_) | Self::Validation(_) => {
                Some(StatusCode::BAD_REQUEST)
            }
            Self::Forbidden(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Database(_) | Self::Serialization(_) | Self::Internal(_) => None,
        }
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::InvalidId(_) | EventError::NotFound(_) | EventError::Validation(_) => {
                AppError::BadRequest(err.to_string())
            }
            EventError::Forbidden(message) => AppError::Unauthorized(message),
            EventError::Database(e) => AppError::Database(e),
            EventError::Serialization(message) | EventError::Internal(message) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        match self.status_code() {
            Some(status) => {
                tracing::info!(%status, "Event request rejected: {}", self);
                (status, Json(StatusMessage::error(self.to_string()))).into_response()
            }
            None => AppError::from(self).into_response(),
        }
    }
}
