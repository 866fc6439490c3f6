//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventPayload};
use crate::repository::EventRepository;

pub const COLLECTION: &str = "Event";

/// Stored shape: `_id` is a real ObjectId and the schedule a BSON date
/// (millisecond precision, wall-clock time stored as if UTC).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    owner: String,
    datetime: bson::DateTime,
    description: String,
    event_name: String,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    recipy_url: Option<String>,
    #[serde(default)]
    attendants: Vec<String>,
}

fn to_bson_datetime(value: NaiveDateTime) -> bson::DateTime {
    bson::DateTime::from_millis(value.and_utc().timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> EventResult<NaiveDateTime> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .map(|utc| utc.naive_utc())
        .ok_or_else(|| EventError::Serialization(format!("datetime out of range: {value}")))
}

impl EventDocument {
    fn from_event(event: &Event) -> EventResult<Self> {
        Ok(Self {
            id: event.object_id()?,
            owner: event.owner.clone(),
            datetime: to_bson_datetime(event.datetime),
            description: event.description.clone(),
            event_name: event.event_name.clone(),
            private: event.private,
            recipy_url: event.recipy_url.clone(),
            attendants: event.attendants.clone(),
        })
    }
}

impl TryFrom<EventDocument> for Event {
    type Error = EventError;

    fn try_from(doc: EventDocument) -> EventResult<Self> {
        Ok(Event {
            id: doc.id.to_hex(),
            owner: doc.owner,
            datetime: from_bson_datetime(doc.datetime)?,
            description: doc.description,
            event_name: doc.event_name,
            private: doc.private,
            recipy_url: doc.recipy_url,
            attendants: doc.attendants,
        })
    }
}

#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Indexes backing the list sort and owner lookups.
    pub async fn create_indexes(&self) -> EventResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "datetime": 1 }).build(),
            IndexModel::builder().keys(doc! { "owner": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = COLLECTION, "Event indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, payload), fields(owner = %payload.owner))]
    async fn create(&self, payload: EventPayload) -> EventResult<Event> {
        let event = Event::new(ObjectId::new().to_hex(), payload);
        let document = EventDocument::from_event(&event)?;

        self.collection.insert_one(&document).await?;

        tracing::info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &ObjectId) -> EventResult<Option<Event>> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await?
            .map(Event::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, skip: u64, limit: u64) -> EventResult<Vec<Event>> {
        let Some(options) = list_options(skip, limit) else {
            return Ok(Vec::new());
        };

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Event::try_from).collect()
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn replace(&self, event: &Event) -> EventResult<bool> {
        let document = EventDocument::from_event(event)?;
        let result = self
            .collection
            .replace_one(doc! { "_id": document.id }, &document)
            .await?;

        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ObjectId) -> EventResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(event_id = %id, "Event deleted");
        }
        Ok(result.deleted_count > 0)
    }
}

/// Schedule-ordered page options. `None` when `skip` lies beyond what the
/// server accepts (an i64), which is necessarily past the last event.
fn list_options(skip: u64, limit: u64) -> Option<FindOptions> {
    i64::try_from(skip).ok()?;
    Some(
        FindOptions::builder()
            .sort(doc! { "datetime": 1, "_id": 1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build(),
    )
}
