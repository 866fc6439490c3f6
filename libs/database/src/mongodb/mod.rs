//! MongoDB connection management.

mod config;
mod connector;
mod errors;
mod health;

pub use config::MongoConfig;
pub use connector::{MongoError, connect, connect_from_config};
pub use errors::{DUPLICATE_KEY_CODE, is_duplicate_key};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
