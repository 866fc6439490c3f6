//! Event Service - the operations behind the event endpoints

use axum_helpers::CurrentUser;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventPayload, parse_event_id};
use crate::repository::EventRepository;
use crate::rules;

/// Events per listing page.
pub const PAGE_SIZE: u64 = 10;

pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Resolve an id string to the stored event.
    #[instrument(skip(self))]
    pub async fn find(&self, id: &str) -> EventResult<Event> {
        let object_id = parse_event_id(id)?;
        self.repository
            .get(&object_id)
            .await?
            .ok_or_else(|| EventError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, user, payload), fields(user = %user.nickname))]
    pub async fn create(&self, user: &CurrentUser, payload: EventPayload) -> EventResult<Event> {
        rules::validate_event(&payload, user)?;
        self.repository.create(payload).await
    }

    /// Read an event the caller is allowed to see.
    #[instrument(skip(self, user), fields(user = %user.nickname))]
    pub async fn read(&self, id: &str, user: &CurrentUser) -> EventResult<Event> {
        let event = self.find(id).await?;
        rules::ensure_can_view(&event, user)?;
        Ok(event)
    }

    /// Zero-based page of at most [`PAGE_SIZE`] events ordered by schedule.
    #[instrument(skip(self))]
    pub async fn list(&self, page: u64) -> EventResult<Vec<Event>> {
        self.repository
            .list(page.saturating_mul(PAGE_SIZE), PAGE_SIZE)
            .await
    }

    /// Replace every field of an event owned by the caller.
    #[instrument(skip(self, user, payload), fields(user = %user.nickname))]
    pub async fn update(
        &self,
        id: &str,
        user: &CurrentUser,
        payload: EventPayload,
    ) -> EventResult<Event> {
        let mut event = self.find(id).await?;
        rules::validate_event(&payload, user)?;
        rules::ensure_owner(&event, user)?;

        event.replace_with(payload);
        if !self.repository.replace(&event).await? {
            return Err(EventError::NotFound(id.to_string()));
        }
        Ok(event)
    }

    #[instrument(skip(self, user), fields(user = %user.nickname))]
    pub async fn delete(&self, id: &str, user: &CurrentUser) -> EventResult<()> {
        let event = self.find(id).await?;
        rules::ensure_owner(&event, user)?;

        if !self.repository.delete(&event.object_id()?).await? {
            return Err(EventError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::payload;
    use crate::repository::mock::MockEventRepository;
    use crate::rules::{IN_THE_PAST, NOT_OWNER, NOT_VISIBLE, fixtures::user};
    use chrono::Duration;
    use mockall::predicate::eq;
    use mongodb::bson::oid::ObjectId;

    const ID: &str = "65f1c0ffee0000000000beef";

    fn stored(owner: &str) -> Event {
        Event::new(ID, payload(owner))
    }

    fn oid() -> ObjectId {
        ObjectId::parse_str(ID).unwrap()
    }

    #[tokio::test]
    async fn test_find_rejects_malformed_id_without_touching_storage() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().never();

        let err = EventService::new(repo).find("123").await.unwrap_err();
        assert!(matches!(err, EventError::InvalidId(_)));
        assert_eq!(err.to_string(), "123 is a wrong Event id.");
    }

    #[tokio::test]
    async fn test_find_missing_event() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().with(eq(oid())).returning(|_| Ok(None));

        let err = EventService::new(repo).find(ID).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Could not find event with id: {ID}"));
    }

    #[tokio::test]
    async fn test_create_persists_valid_payload() {
        let mut repo = MockEventRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|p| Ok(Event::new(ID, p)));

        let event = EventService::new(repo)
            .create(&user("alice"), payload("alice"))
            .await
            .unwrap();
        assert_eq!(event.id, ID);
    }

    #[tokio::test]
    async fn test_create_rejects_without_persisting() {
        let mut repo = MockEventRepository::new();
        repo.expect_create().never();
        let service = EventService::new(repo);

        let err = service.create(&user("alice"), payload("bob")).await.unwrap_err();
        assert_eq!(err.to_string(), NOT_OWNER);

        let mut past = payload("alice");
        past.datetime -= Duration::days(2);
        let err = service.create(&user("alice"), past).await.unwrap_err();
        assert_eq!(err.to_string(), IN_THE_PAST);
    }

    #[tokio::test]
    async fn test_read_private_event() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().returning(|_| {
            let mut event = stored("alice");
            event.private = true;
            event.attendants = vec!["carol".into()];
            Ok(Some(event))
        });
        let service = EventService::new(repo);

        assert!(service.read(ID, &user("alice")).await.is_ok());
        assert!(service.read(ID, &user("carol")).await.is_ok());

        let err = service.read(ID, &user("bob")).await.unwrap_err();
        assert!(matches!(err, EventError::Forbidden(ref m) if m == NOT_VISIBLE));
    }

    #[tokio::test]
    async fn test_list_computes_skip_and_limit() {
        let mut repo = MockEventRepository::new();
        repo.expect_list()
            .with(eq(20), eq(PAGE_SIZE))
            .returning(|_, _| Ok(vec![]));
        repo.expect_list()
            .with(eq(u64::MAX), eq(PAGE_SIZE))
            .returning(|_, _| Ok(vec![]));
        let service = EventService::new(repo);

        assert!(service.list(2).await.unwrap().is_empty());
        assert!(service.list(u64::MAX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().returning(|_| Ok(Some(stored("alice"))));
        repo.expect_replace()
            .withf(|e| e.id == ID && e.event_name == "Brunch" && e.recipy_url.is_none())
            .times(1)
            .returning(|_| Ok(true));

        let mut next = payload("alice");
        next.event_name = "Brunch".into();
        next.recipy_url = None;

        let event = EventService::new(repo)
            .update(ID, &user("alice"), next)
            .await
            .unwrap();
        assert_eq!(event.event_name, "Brunch");
    }

    #[tokio::test]
    async fn test_update_validation_failure_leaves_record() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().returning(|_| Ok(Some(stored("alice"))));
        repo.expect_replace().never();

        let mut past = payload("alice");
        past.datetime -= Duration::days(2);

        let err = EventService::new(repo)
            .update(ID, &user("alice"), past)
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::Validation(ref m) if m == IN_THE_PAST));
    }

    #[tokio::test]
    async fn test_update_requires_stored_owner() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().returning(|_| Ok(Some(stored("alice"))));
        repo.expect_replace().never();

        let err = EventService::new(repo)
            .update(ID, &user("bob"), payload("bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::Forbidden(ref m) if m == NOT_OWNER));
    }

    #[tokio::test]
    async fn test_update_vanished_record_is_not_found() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().returning(|_| Ok(Some(stored("alice"))));
        repo.expect_replace().returning(|_| Ok(false));

        let err = EventService::new(repo)
            .update(ID, &user("alice"), payload("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().returning(|_| Ok(Some(stored("alice"))));
        repo.expect_delete().never();

        let err = EventService::new(repo)
            .delete(ID, &user("bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::Forbidden(ref m) if m == NOT_OWNER));
    }

    #[tokio::test]
    async fn test_delete_race_is_not_found() {
        let mut repo = MockEventRepository::new();
        repo.expect_get().returning(|_| Ok(Some(stored("alice"))));
        repo.expect_delete().with(eq(oid())).returning(|_| Ok(false));

        let err = EventService::new(repo)
            .delete(ID, &user("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::NotFound(_)));
    }
}
