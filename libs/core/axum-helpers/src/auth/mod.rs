//! Bearer-token authentication building blocks.
//!
//! - [`JwtAuth`] signs and verifies HS256 tokens scoped by audience
//! - [`extract_bearer_token`] reads `Authorization: Bearer <token>`
//! - [`CurrentUser`] is the identity that authentication middleware places in
//!   request extensions; handlers take it as an extractor
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, JwtClaims};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let token = auth.encode(&JwtClaims::new(user_id, "events:auth", auth.lifetime()))?;
//! let claims = auth.decode(&token, "events:auth")?;
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod user;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, JwtError};
pub use middleware::extract_bearer_token;
pub use user::CurrentUser;
