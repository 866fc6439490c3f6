use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Authenticated caller, inserted into request extensions by the auth middleware.
///
/// `nickname` is the identifier events use for `owner` and `attendants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub nickname: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "65f000000000000000000001".into(),
            email: "a@example.com".into(),
            nickname: "alice".into(),
            is_active: true,
            is_superuser: false,
            is_verified: false,
        }
    }

    #[tokio::test]
    async fn test_extracts_user_from_extensions() {
        let mut request = Request::new(());
        request.extensions_mut().insert(user());
        let (mut parts, _) = request.into_parts();

        let extracted = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, user());
    }

    #[tokio::test]
    async fn test_missing_user_is_unauthorized() {
        let (mut parts, _) = Request::new(()).into_parts();
        let err = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
