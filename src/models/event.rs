use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an event. Events start out as `Original`; cancellation
/// and rescheduling stamp a terminal marker but do not lock the row, so a
/// canceled event can still be rescheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Original,
    Canceled,
    Rescheduled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Original => "original",
            EventStatus::Canceled => "canceled",
            EventStatus::Rescheduled => "rescheduled",
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(EventStatus::Original),
            "canceled" => Ok(EventStatus::Canceled),
            "rescheduled" => Ok(EventStatus::Rescheduled),
            other => Err(format!("unknown event status '{other}'")),
        }
    }
}

/// Start and end instants for an event.
///
/// Missing fields deserialize to the Unix epoch, which the validation layer
/// treats as unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default)]
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: DateTime<Utc>,
}

/// The sole persisted entity.
///
/// `id` and every timestamp are assigned by the store, never by the client.
/// The hyphenated JSON names are the published wire format and must not
/// change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "phone-number", default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<TimeSlot>,

    #[serde(default)]
    pub status: EventStatus,

    #[serde(rename = "created-at", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updated-at", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "canceled-at", default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(rename = "rescheduled-at", default, skip_serializing_if = "Option::is_none")]
    pub rescheduled_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            EventStatus::Original,
            EventStatus::Canceled,
            EventStatus::Rescheduled,
        ] {
            assert_eq!(status.as_str().parse::<EventStatus>(), Ok(status));
        }
        assert!("gone".parse::<EventStatus>().is_err());
    }

    #[test]
    fn event_serializes_with_wire_names() {
        let event = Event {
            id: "1-2-3".into(),
            name: Some("Launch".into()),
            phone_number: Some("555-0100".into()),
            ..Event::default()
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], "1-2-3");
        assert_eq!(json["phone-number"], "555-0100");
        assert_eq!(json["status"], "original");
        assert!(json.get("created-at").is_none());
        assert!(json.get("slot").is_none());
    }

    #[test]
    fn time_slot_defaults_missing_fields_to_epoch() {
        let slot: TimeSlot = serde_json::from_str(r#"{"start":"2024-06-01T10:00:00Z"}"#).unwrap();
        assert_eq!(slot.end, DateTime::<Utc>::UNIX_EPOCH);
    }
}
