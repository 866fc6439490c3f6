//! Users domain
//!
//! Registration, stateless JWT login, password reset and e-mail verification,
//! plus the middleware that turns a bearer token into a
//! [`CurrentUser`](axum_helpers::CurrentUser) for other domains' routes.
//!
//! ```text
//! handlers / auth_handlers  → HTTP endpoints
//!        │
//!   UserService             → password policy, tokens, uniqueness checks
//!        │
//!   UserRepository          → MongoDB or in-memory storage
//! ```
//!
//! ```rust,ignore
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let service = UserService::new(InMemoryUserRepository::new(), jwt_auth);
//! let router = handlers::router(service);
//! ```

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use auth_handlers::AuthApiDoc;
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, router, with_current_user};
pub use middleware::current_active_user;
pub use models::{BearerToken, NewUser, User, UserCreate, UserRead, UserUpdate};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{AUTH_AUDIENCE, UserService};
