//! Events domain
//!
//! Authenticated users schedule events, list them page by page, and update or
//! delete the ones they own. Private events are readable by their owner and
//! attendants only.
//!
//! - [`rules`]: ownership, scheduling and visibility checks
//! - [`EventService`]: the operations behind the HTTP handlers
//! - [`EventRepository`]: storage seam with MongoDB and in-memory implementations
//! - [`StatusMessage`]: the `{status, message, data?}` envelope returned by writes

pub mod datetime;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod rules;
pub mod service;
pub mod status;

pub use error::{EventError, EventResult};
pub use handlers::{ApiDoc, router};
pub use models::{Event, EventPayload};
pub use mongodb::MongoEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::{EventService, PAGE_SIZE};
pub use status::{Status, StatusMessage};
