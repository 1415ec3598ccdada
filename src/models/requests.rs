use serde::{Deserialize, Serialize};

use crate::models::event::{Event, TimeSlot};

/// Upper bound on a single listing page; also the effective limit when the
/// client asks for 0 ("use default") or anything larger.
pub const MAX_LIST_LIMIT: usize = 200;

/// Query parameters for fetching a single event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetParams {
    #[serde(default)]
    pub id: String,
}

/// Query parameters for listing events.
///
/// `limit` stays a raw string here so an unparsable value maps to the
/// `NotInteger` domain error instead of a framework-level rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Validated listing arguments handed to the store.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub limit: usize,
    pub after: String,
    pub name: String,
}

/// Body for creating a new event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub event: Option<Event>,
}

/// Body for updating the editable fields of an existing event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "phone-number", default)]
    pub phone_number: Option<String>,
}

/// Body for canceling an existing event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub id: String,
}

/// Body for rescheduling an existing event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RescheduleRequest {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "new-time-slot", default)]
    pub new_time_slot: Option<TimeSlot>,
}

/// Body for deleting an existing event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id: String,
}
