//! `/auth/*` endpoints: registration, login and the token flows

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    CurrentUser, FormBody, JsonBody, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
        UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    BearerToken, EmailRequest, LoginForm, ResetPasswordRequest, UserCreate, UserRead,
    VerifyRequest,
};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(
        register,
        login,
        logout,
        forgot_password,
        reset_password,
        request_verify_token,
        verify,
    ),
    components(
        schemas(
            UserCreate,
            UserRead,
            LoginForm,
            BearerToken,
            EmailRequest,
            ResetPasswordRequest,
            VerifyRequest
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and account tokens")
    )
)]
pub struct AuthApiDoc;

/// Routes reachable without a token.
pub(crate) fn public_routes<R: UserRepository + 'static>() -> Router<Arc<UserService<R>>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/jwt/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/request-verify-token", post(request_verify_token))
        .route("/auth/verify", post(verify))
}

pub(crate) fn protected_routes<R: UserRepository + 'static>() -> Router<Arc<UserService<R>>> {
    Router::new().route("/auth/jwt/logout", post(logout))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User registered", body = UserRead),
        (status = 400, description = "REGISTER_USER_ALREADY_EXISTS, REGISTER_INVALID_PASSWORD or invalid e-mail"),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<UserCreate>,
) -> UserResult<impl IntoResponse> {
    let user = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(UserRead::from(user))))
}

/// Exchange e-mail and password for a bearer token
#[utoipa::path(
    post,
    path = "/auth/jwt/login",
    tag = "Auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token", body = BearerToken),
        (status = 400, description = "LOGIN_BAD_CREDENTIALS"),
        (status = 422, response = UnprocessableEntityResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    FormBody(form): FormBody<LoginForm>,
) -> UserResult<Json<BearerToken>> {
    let token = service.login(&form.username, &form.password).await?;
    Ok(Json(token))
}

/// Tokens are stateless; logging out only acknowledges the caller
#[utoipa::path(
    post,
    path = "/auth/jwt/logout",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn logout(user: CurrentUser) -> StatusCode {
    tracing::info!(user_id = %user.id, "User logged out");
    StatusCode::NO_CONTENT
}

/// Start a password reset
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Auth",
    request_body = EmailRequest,
    responses(
        (status = 202, description = "Accepted whether or not the account exists"),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn forgot_password<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<EmailRequest>,
) -> UserResult<StatusCode> {
    service.forgot_password(&input.email).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "Auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = UserRead),
        (status = 400, description = "RESET_PASSWORD_BAD_TOKEN or RESET_PASSWORD_INVALID_PASSWORD"),
        (status = 422, response = UnprocessableEntityResponse)
    )
)]
async fn reset_password<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<ResetPasswordRequest>,
) -> UserResult<Json<UserRead>> {
    let user = service.reset_password(&input.token, &input.password).await?;
    Ok(Json(user.into()))
}

/// Ask for an e-mail verification token
#[utoipa::path(
    post,
    path = "/auth/request-verify-token",
    tag = "Auth",
    request_body = EmailRequest,
    responses(
        (status = 202, description = "Accepted whether or not the account exists"),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn request_verify_token<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<EmailRequest>,
) -> UserResult<StatusCode> {
    service.request_verify(&input.email).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Confirm an e-mail address
#[utoipa::path(
    post,
    path = "/auth/verify",
    tag = "Auth",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "User verified", body = UserRead),
        (status = 400, description = "VERIFY_USER_BAD_TOKEN or VERIFY_USER_ALREADY_VERIFIED"),
        (status = 422, response = UnprocessableEntityResponse)
    )
)]
async fn verify<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<VerifyRequest>,
) -> UserResult<Json<UserRead>> {
    let user = service.verify(&input.token).await?;
    Ok(Json(user.into()))
}
