//! Ownership, scheduling and visibility rules.
//!
//! Pure functions over the acting user; the clock is a parameter of
//! [`validate_event_at`] so the rules can be tested against a fixed instant.

use axum_helpers::CurrentUser;
use chrono::{Local, NaiveDateTime};

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventPayload};

pub const NOT_OWNER: &str = "Current user must be an Event owner.";
pub const IN_THE_PAST: &str = "Event can not happen in the past.";
pub const NOT_VISIBLE: &str = "User not authorized to access this event.";

/// Payload checks for create and update, first failure wins:
/// the owner must be the acting user, and the event must not be scheduled
/// before `now`.
pub fn validate_event_at(
    payload: &EventPayload,
    user: &CurrentUser,
    now: NaiveDateTime,
) -> EventResult<()> {
    if payload.owner != user.nickname {
        return Err(EventError::Validation(NOT_OWNER.to_string()));
    }
    if payload.datetime < now {
        return Err(EventError::Validation(IN_THE_PAST.to_string()));
    }
    Ok(())
}

/// [`validate_event_at`] against the local wall clock.
pub fn validate_event(payload: &EventPayload, user: &CurrentUser) -> EventResult<()> {
    validate_event_at(payload, user, Local::now().naive_local())
}

/// Public events are visible to everyone; private ones to the owner and attendants.
pub fn can_view(event: &Event, user: &CurrentUser) -> bool {
    !event.private
        || event.owner == user.nickname
        || event.attendants.iter().any(|a| *a == user.nickname)
}

pub fn ensure_can_view(event: &Event, user: &CurrentUser) -> EventResult<()> {
    if can_view(event, user) {
        Ok(())
    } else {
        Err(EventError::Forbidden(NOT_VISIBLE.to_string()))
    }
}

/// Only the owner may delete.
pub fn ensure_owner(event: &Event, user: &CurrentUser) -> EventResult<()> {
    if event.owner == user.nickname {
        Ok(())
    } else {
        Err(EventError::Forbidden(NOT_OWNER.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use axum_helpers::CurrentUser;

    pub fn user(nickname: &str) -> CurrentUser {
        CurrentUser {
            id: "65f000000000000000000001".to_string(),
            email: format!("{nickname}@example.com"),
            nickname: nickname.to_string(),
            is_active: true,
            is_superuser: false,
            is_verified: true,
        }
    }
}
