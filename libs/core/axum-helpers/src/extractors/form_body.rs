use crate::errors::AppError;
use axum::extract::{Form, FromRequest, Request};
use serde::de::DeserializeOwned;

/// `Form<T>` with an [`AppError`] rejection, for
/// `application/x-www-form-urlencoded` bodies such as the login form.
pub struct FormBody<T>(pub T);

impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(data) = Form::<T>::from_request(req, state).await?;
        Ok(FormBody(data))
    }
}
