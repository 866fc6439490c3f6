use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, CurrentUser, extract_bearer_token};
use std::sync::Arc;

use crate::error::UserError;
use crate::repository::UserRepository;
use crate::service::UserService;

/// Resolve `Authorization: Bearer <token>` into an active user and store it
/// as a [`CurrentUser`] extension; anything else is rejected with 401.
///
/// ```ignore
/// let protected = domain_events::router(events)
///     .layer(axum::middleware::from_fn_with_state(
///         users.clone(),
///         current_active_user::<MongoUserRepository>,
///     ));
/// ```
pub async fn current_active_user<R: UserRepository + 'static>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(&headers) else {
        tracing::debug!("No bearer token in Authorization header");
        return unauthorized();
    };

    match service.current_user(token).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser::from(user));
            next.run(request).await
        }
        Err(UserError::Unauthorized) => unauthorized(),
        Err(e) => e.into_response(),
    }
}

fn unauthorized() -> Response {
    AppError::Unauthorized("Authentication required".to_string()).into_response()
}
