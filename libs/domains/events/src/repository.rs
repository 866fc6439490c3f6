//! Event repository trait and the in-memory implementation

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::EventResult;
use crate::models::{Event, EventPayload};

/// Storage for events.
///
/// `list` orders by scheduled time, ties broken by id.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event; the repository assigns the id.
    async fn create(&self, payload: EventPayload) -> EventResult<Event>;

    async fn get(&self, id: &ObjectId) -> EventResult<Option<Event>>;

    async fn list(&self, skip: u64, limit: u64) -> EventResult<Vec<Event>>;

    /// Overwrite the stored record with the same id. `false` when it vanished.
    async fn replace(&self, event: &Event) -> EventResult<bool>;

    /// `false` when nothing was removed.
    async fn delete(&self, id: &ObjectId) -> EventResult<bool>;
}

/// Process-local store used when the service runs in testing mode.
#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<String, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    #[instrument(skip(self, payload), fields(owner = %payload.owner))]
    async fn create(&self, payload: EventPayload) -> EventResult<Event> {
        let event = Event::new(ObjectId::new().to_hex(), payload);
        self.events
            .write()
            .await
            .insert(event.id.clone(), event.clone());
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &ObjectId) -> EventResult<Option<Event>> {
        Ok(self.events.read().await.get(&id.to_hex()).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self, skip: u64, limit: u64) -> EventResult<Vec<Event>> {
        let events = self.events.read().await;
        let mut sorted: Vec<&Event> = events.values().collect();
        sorted.sort_by(|a, b| (a.datetime, &a.id).cmp(&(b.datetime, &b.id)));

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(sorted.into_iter().skip(skip).take(limit).cloned().collect())
    }

    #[instrument(skip(self, event), fields(id = %event.id))]
    async fn replace(&self, event: &Event) -> EventResult<bool> {
        let mut events = self.events.write().await;
        match events.get_mut(&event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ObjectId) -> EventResult<bool> {
        Ok(self.events.write().await.remove(&id.to_hex()).is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub EventRepository {}

        #[async_trait]
        impl EventRepository for EventRepository {
            async fn create(&self, payload: EventPayload) -> EventResult<Event>;
            async fn get(&self, id: &ObjectId) -> EventResult<Option<Event>>;
            async fn list(&self, skip: u64, limit: u64) -> EventResult<Vec<Event>>;
            async fn replace(&self, event: &Event) -> EventResult<bool>;
            async fn delete(&self, id: &ObjectId) -> EventResult<bool>;
        }
    }
}
