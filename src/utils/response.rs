use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::Event;

/// Success envelope for every event endpoint. Single-row operations fill
/// `event`, listing fills `events`, mutations return the empty envelope.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,
}

/// Error body sent to clients. The numeric code mirrors the HTTP status so
/// the payload is self-describing; nothing else is exposed.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

pub fn event(event: Event) -> Response {
    let body = EventEnvelope {
        event: Some(event),
        events: None,
    };

    (StatusCode::OK, Json(body)).into_response()
}

pub fn events(events: Vec<Event>) -> Response {
    let body = EventEnvelope {
        event: None,
        events: Some(events),
    };

    (StatusCode::OK, Json(body)).into_response()
}

pub fn empty() -> Response {
    (StatusCode::OK, Json(EventEnvelope::default())).into_response()
}

pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        code: status.as_u16(),
        message: message.into(),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_envelope_serializes_to_empty_object() {
        let json = serde_json::to_string(&EventEnvelope::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn single_event_envelope_omits_list_field() {
        let envelope = EventEnvelope {
            event: Some(Event::default()),
            events: None,
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("event").is_some());
        assert!(json.get("events").is_none());
    }
}
