//! API routes
//!
//! Wires the events and users domains to the storage backend chosen at
//! startup. Event routes sit behind the current-user middleware.

pub mod health;

use axum::Router;
use axum_helpers::JwtAuth;
use domain_events::{EventRepository, EventService, InMemoryEventRepository, MongoEventRepository};
use domain_users::{
    InMemoryUserRepository, MongoUserRepository, UserRepository, UserService, with_current_user,
};
use std::sync::Arc;

use crate::state::{AppState, Backend};

pub fn routes(state: &AppState) -> Router {
    let api = match &state.backend {
        Backend::InMemory => wire(
            InMemoryEventRepository::new(),
            InMemoryUserRepository::new(),
            state.jwt.clone(),
        ),
        Backend::Mongo { db, .. } => wire(
            MongoEventRepository::new(db),
            MongoUserRepository::new(db),
            state.jwt.clone(),
        ),
    };

    api.merge(health::router(state.clone()))
}

fn wire<E, U>(events: E, users: U, jwt: JwtAuth) -> Router
where
    E: EventRepository + 'static,
    U: UserRepository + 'static,
{
    let users = UserService::new(users, jwt);
    let events = with_current_user(
        domain_events::router(EventService::new(events)),
        Arc::new(users.clone()),
    );

    domain_users::router(users).merge(events)
}
