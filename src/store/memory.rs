use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::{effective_limit, Clock, EventStore, IdGenerator};
use crate::models::{CreateRequest, Event, EventStatus, ListRequest, TimeSlot, UpdateRequest};
use crate::utils::ApiError;

/// In-memory `EventStore` used by the test suite and available as a drop-in
/// backend. A `BTreeMap` keyed by id gives the same id-ascending iteration
/// order the relational backend gets from `ORDER BY id`.
pub struct InMemoryEventStore {
    clock: Clock,
    ids: IdGenerator,
    events: RwLock<BTreeMap<String, Event>>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            ids: IdGenerator::new(clock),
            events: RwLock::new(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn get(&self, id: &str) -> Result<Event, ApiError> {
        self.events
            .read()
            .get(id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn list(&self, request: &ListRequest) -> Result<Vec<Event>, ApiError> {
        let limit = effective_limit(request.limit);
        let filter = request.name.to_lowercase();

        let events = self.events.read();

        let after: Bound<&str> = if request.after.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(request.after.as_str())
        };

        let list = events
            .range::<str, _>((after, Bound::Unbounded))
            .map(|(_, event)| event)
            .filter(|event| {
                filter.is_empty()
                    || event
                        .name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&filter))
            })
            .take(limit)
            .cloned()
            .collect();

        Ok(list)
    }

    async fn create(&self, request: CreateRequest) -> Result<Event, ApiError> {
        let mut event = request.event.ok_or(ApiError::MissingEvent)?;

        event.id = self.ids.generate();
        event.status = EventStatus::Original;
        event.created_at = Some((self.clock)());

        self.events
            .write()
            .insert(event.id.clone(), event.clone());

        Ok(event)
    }

    async fn update(&self, request: &UpdateRequest) -> Result<(), ApiError> {
        // Missing ids are a silent no-op, same as the relational backend.
        if let Some(event) = self.events.write().get_mut(&request.id) {
            event.name = request.name.clone();
            event.description = request.description.clone();
            event.website = request.website.clone();
            event.address = request.address.clone();
            event.phone_number = request.phone_number.clone();
            event.updated_at = Some((self.clock)());
        }

        Ok(())
    }

    async fn cancel(&self, id: &str) -> Result<(), ApiError> {
        if let Some(event) = self.events.write().get_mut(id) {
            event.status = EventStatus::Canceled;
            event.canceled_at = Some((self.clock)());
        }

        Ok(())
    }

    async fn reschedule(&self, id: &str, slot: TimeSlot) -> Result<(), ApiError> {
        if let Some(event) = self.events.write().get_mut(id) {
            event.slot = Some(slot);
            event.status = EventStatus::Rescheduled;
            event.rescheduled_at = Some((self.clock)());
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.events.write().remove(id);

        Ok(())
    }
}
