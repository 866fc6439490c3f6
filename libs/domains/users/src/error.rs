use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::JwtError;
use serde_json::json;
use thiserror::Error;

/// Users domain failures.
///
/// Client errors carry a stable machine-readable code, rendered as
/// `{"error": {"type": <code>, "message": <text>}}`.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("A user with this email or nickname already exists")]
    AlreadyExists,

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Bad credentials or the user is inactive")]
    BadCredentials,

    #[error("Bad or expired password reset token")]
    ResetPasswordBadToken,

    #[error("Invalid password: {0}")]
    ResetPasswordInvalidPassword(String),

    #[error("Bad or expired verification token")]
    VerifyBadToken,

    #[error("The user is already verified")]
    AlreadyVerified,

    #[error("A user with this email already exists")]
    UpdateEmailAlreadyExists,

    #[error("A user with this nickname already exists")]
    UpdateNicknameAlreadyExists,

    #[error("Invalid password: {0}")]
    UpdateInvalidPassword(String),

    /// Unique index violation reported by storage.
    #[error("Duplicate user")]
    Duplicate,

    #[error("User not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Stable code reported in the `type` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "REGISTER_USER_ALREADY_EXISTS",
            Self::InvalidPassword(_) => "REGISTER_INVALID_PASSWORD",
            Self::BadCredentials => "LOGIN_BAD_CREDENTIALS",
            Self::ResetPasswordBadToken => "RESET_PASSWORD_BAD_TOKEN",
            Self::ResetPasswordInvalidPassword(_) => "RESET_PASSWORD_INVALID_PASSWORD",
            Self::VerifyBadToken => "VERIFY_USER_BAD_TOKEN",
            Self::AlreadyVerified => "VERIFY_USER_ALREADY_VERIFIED",
            Self::UpdateEmailAlreadyExists => "UPDATE_USER_EMAIL_ALREADY_EXISTS",
            Self::UpdateNicknameAlreadyExists => "UPDATE_USER_NICKNAME_ALREADY_EXISTS",
            Self::UpdateInvalidPassword(_) => "UPDATE_USER_INVALID_PASSWORD",
            Self::Duplicate => "CONFLICT",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::PasswordHash(_) | Self::Token(_) | Self::Database(_) | Self::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Duplicate => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::PasswordHash(_) | Self::Token(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "User request failed");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(json!({
                "error": {
                    "type": self.code(),
                    "message": message
                }
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_carries_code() {
        let response = UserError::BadCredentials.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body(response).await;
        assert_eq!(body["error"]["type"], "LOGIN_BAD_CREDENTIALS");
        assert_eq!(body["error"]["message"], "Bad credentials or the user is inactive");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = UserError::Internal("mongo exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body(response).await;
        assert_eq!(body["error"]["type"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(UserError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(UserError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(UserError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            UserError::UpdateInvalidPassword("short".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserError::UpdateInvalidPassword("short".into()).code(),
            "UPDATE_USER_INVALID_PASSWORD"
        );
    }
}
