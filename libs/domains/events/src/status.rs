//! Tagged result envelope returned by the event endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// `{"status": "OK" | "Error", "message": "...", "data"?: ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl StatusMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format_without_data() {
        let value = serde_json::to_value(StatusMessage::error("Event can not happen in the past.")).unwrap();
        assert_eq!(
            value,
            json!({"status": "Error", "message": "Event can not happen in the past."})
        );
    }

    #[test]
    fn test_wire_format_with_data() {
        let message = StatusMessage::ok("Event updated").with_data(json!({"event_name": "Dinner"}));
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["status"], "OK");
        assert_eq!(value["data"]["event_name"], "Dinner");
    }

    #[test]
    fn test_status_round_trips_wire_names() {
        assert_eq!(serde_json::to_value(Status::Ok).unwrap(), json!("OK"));
        let status: Status = serde_json::from_value(json!("Error")).unwrap();
        assert_eq!(status, Status::Error);
    }
}
