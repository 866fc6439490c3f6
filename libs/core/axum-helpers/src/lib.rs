//! # Axum Helpers
//!
//! Shared plumbing for the HTTP services in this workspace.
//!
//! - **[`auth`]**: HS256 tokens, bearer extraction, the [`CurrentUser`] extractor
//! - **[`server`]**: router assembly with API docs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security-header layers
//! - **[`errors`]**: [`AppError`] and the [`ErrorResponse`] body with [`ErrorCode`]s
//! - **[`extractors`]**: JSON, form, validated JSON and page-number extractors
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router(api_routes, ApiDoc::openapi()).merge(health_router(app_info!()));
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{CurrentUser, JwtAuth, JwtClaims, JwtConfig, JwtError, extract_bearer_token};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{FormBody, JsonBody, PagePath, ValidatedJson};
