//! Zero-based page number path parameter.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Page number from a `{page}` path segment.
///
/// Anything that is not a non-negative integer is rejected with 422.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePath(pub u64);

impl<S> FromRequestParts<S> for PagePath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::UnprocessableEntity(e.body_text()))?;

        raw.parse::<u64>().map(PagePath).map_err(|_| {
            AppError::UnprocessableEntity(format!("page must be a non-negative integer, got '{raw}'"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::{Request, StatusCode}, routing::get};
    use tower::ServiceExt;

    async fn page(PagePath(page): PagePath) -> String {
        page.to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route("/list/{page}", get(page));
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_page_path_accepts_integers() {
        assert_eq!(status_for("/list/0").await, StatusCode::OK);
        assert_eq!(status_for("/list/18446744073709551615").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_page_path_rejects_non_integers() {
        for uri in ["/list/-1", "/list/two", "/list/1.5"] {
            assert_eq!(status_for(uri).await, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        }
    }
}
