use chrono::NaiveDateTime;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{EventError, EventResult};

/// Stored event.
///
/// `owner` and `attendants` hold user nicknames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// ObjectId hex string
    #[schema(example = "65f1c0ffee0000000000beef")]
    pub id: String,
    pub owner: String,
    #[serde(with = "crate::datetime")]
    #[schema(value_type = String, example = "2030-05-17T18:30:00")]
    pub datetime: NaiveDateTime,
    pub description: String,
    pub event_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub recipy_url: Option<String>,
    #[serde(default)]
    pub attendants: Vec<String>,
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventPayload {
    pub owner: String,
    #[serde(with = "crate::datetime")]
    #[schema(value_type = String, example = "2030-05-17T18:30:00")]
    pub datetime: NaiveDateTime,
    pub description: String,
    pub event_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub recipy_url: Option<String>,
    #[serde(default)]
    pub attendants: Vec<String>,
}

impl Event {
    pub fn new(id: impl Into<String>, payload: EventPayload) -> Self {
        let EventPayload {
            owner,
            datetime,
            description,
            event_name,
            private,
            recipy_url,
            attendants,
        } = payload;

        Self {
            id: id.into(),
            owner,
            datetime,
            description,
            event_name,
            private,
            recipy_url,
            attendants,
        }
    }

    /// Replace every user-editable field; `id` is kept.
    pub fn replace_with(&mut self, payload: EventPayload) {
        self.owner = payload.owner;
        self.datetime = payload.datetime;
        self.description = payload.description;
        self.event_name = payload.event_name;
        self.private = payload.private;
        self.recipy_url = payload.recipy_url;
        self.attendants = payload.attendants;
    }

    pub fn object_id(&self) -> EventResult<ObjectId> {
        parse_event_id(&self.id)
    }
}

/// Parse a path identifier into an ObjectId.
pub fn parse_event_id(id: &str) -> EventResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| EventError::InvalidId(id.to_string()))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::{Duration, Local};

    /// Public event owned by `owner`, one day in the future.
    pub fn payload(owner: &str) -> EventPayload {
        EventPayload {
            owner: owner.to_string(),
            datetime: Local::now().naive_local() + Duration::days(1),
            description: "Pasta night".to_string(),
            event_name: "Dinner".to_string(),
            private: false,
            recipy_url: Some("https://recipes.example.com/carbonara".to_string()),
            attendants: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_defaults() {
        let payload: EventPayload = serde_json::from_value(json!({
            "owner": "alice",
            "datetime": "2030-05-17 18:30:00",
            "description": "d",
            "event_name": "n"
        }))
        .unwrap();

        assert!(!payload.private);
        assert!(payload.recipy_url.is_none());
        assert!(payload.attendants.is_empty());
    }

    #[test]
    fn test_payload_rejects_missing_fields() {
        let result = serde_json::from_value::<EventPayload>(json!({
            "owner": "alice",
            "datetime": "2030-05-17T18:30:00"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_replace_with_keeps_id_and_replaces_everything_else() {
        let mut event = Event::new("65f1c0ffee0000000000beef", fixtures::payload("alice"));
        let mut next = fixtures::payload("alice");
        next.event_name = "Brunch".into();
        next.private = true;
        next.recipy_url = None;
        next.attendants = vec!["bob".into(), "bob".into()];

        event.replace_with(next.clone());

        assert_eq!(event.id, "65f1c0ffee0000000000beef");
        assert_eq!(event, Event::new("65f1c0ffee0000000000beef", next));
    }

    #[test]
    fn test_parse_event_id() {
        assert!(parse_event_id("65f1c0ffee0000000000beef").is_ok());

        let err = parse_event_id("not-an-id").unwrap_err();
        assert_eq!(err.to_string(), "not-an-id is a wrong Event id.");
    }
}
