use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
};
use axum_helpers::{
    CurrentUser, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::auth_handlers;
use crate::error::{UserError, UserResult};
use crate::middleware::current_active_user;
use crate::models::{Greeting, UserRead, UserUpdate};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_me,
        update_me,
        get_user,
        update_user,
        delete_user,
        authenticated_route,
    ),
    components(
        schemas(UserRead, UserUpdate, Greeting),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Profile and user management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the auth and users router.
///
/// Everything except registration, login and the token flows requires a
/// bearer token.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    let protected: Router<Arc<UserService<R>>> = Router::new()
        .route("/users/me", get(get_me).patch(update_me))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/authenticated-route", get(authenticated_route))
        .merge(auth_handlers::protected_routes());

    auth_handlers::public_routes()
        .merge(with_current_user(protected, Arc::clone(&shared_service)))
        .with_state(shared_service)
}

/// Require an active user on every route of `router`.
pub fn with_current_user<R, S>(router: Router<S>, service: Arc<UserService<R>>) -> Router<S>
where
    R: UserRepository + 'static,
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        service,
        current_active_user::<R>,
    ))
}

fn require_superuser(user: &CurrentUser) -> UserResult<()> {
    if user.is_superuser {
        Ok(())
    } else {
        Err(UserError::Forbidden)
    }
}

/// Profile of the caller
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserRead),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn get_me(user: CurrentUser) -> Json<UserRead> {
    Json(user.into())
}

/// Update the caller's nickname, e-mail or password
#[utoipa::path(
    patch,
    path = "/users/me",
    tag = "Users",
    request_body = UserUpdate,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated user", body = UserRead),
        (status = 400, description = "UPDATE_USER_EMAIL_ALREADY_EXISTS or UPDATE_USER_INVALID_PASSWORD"),
        (status = 401, response = UnauthorizedResponse),
        (status = 422, response = UnprocessableEntityResponse)
    )
)]
async fn update_me<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user: CurrentUser,
    ValidatedJson(update): ValidatedJson<UserUpdate>,
) -> UserResult<Json<UserRead>> {
    let stored = service.get(&user.id).await?;
    let updated = service.update(stored, update, true).await?;
    Ok(Json(updated.into()))
}

/// Get any user (superuser only)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User found", body = UserRead),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> UserResult<Json<UserRead>> {
    require_superuser(&user)?;
    let found = service.get(&id).await?;
    Ok(Json(found.into()))
}

/// Update any user, including account flags (superuser only)
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserUpdate,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated user", body = UserRead),
        (status = 400, description = "UPDATE_USER_EMAIL_ALREADY_EXISTS or UPDATE_USER_INVALID_PASSWORD"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<UserUpdate>,
) -> UserResult<Json<UserRead>> {
    require_superuser(&user)?;
    let stored = service.get(&id).await?;
    let updated = service.update(stored, update, false).await?;
    Ok(Json(updated.into()))
}

/// Delete a user (superuser only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> UserResult<StatusCode> {
    require_superuser(&user)?;
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Greets the authenticated caller
#[utoipa::path(
    get,
    path = "/authenticated-route",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Greeting", body = Greeting),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn authenticated_route(user: CurrentUser) -> Json<Greeting> {
    Json(Greeting {
        message: format!("Hello {}!", user.email),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::user;

    #[test]
    fn test_require_superuser() {
        let mut current = CurrentUser::from(user("alice"));
        assert!(matches!(require_superuser(&current), Err(UserError::Forbidden)));

        current.is_superuser = true;
        assert!(require_superuser(&current).is_ok());
    }
}
