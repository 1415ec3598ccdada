//! Persistence boundary for events.
//!
//! `EventStore` is the capability interface the handlers program against;
//! the Postgres implementation backs the running service and the in-memory
//! implementation backs the test suite. Both take their notion of "now" from
//! an injected clock so timestamp behavior is deterministic under test.

pub mod id;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{CreateRequest, Event, ListRequest, TimeSlot, UpdateRequest};
use crate::utils::ApiError;

pub use id::IdGenerator;
pub use memory::InMemoryEventStore;
pub use postgres::PgEventStore;

/// Store-wide clock. Production code passes `Utc::now`; tests pass a fixed
/// function.
pub type Clock = fn() -> DateTime<Utc>;

/// Database interactions for storing events.
///
/// Every operation is a single round trip touching at most one row, so a
/// cancelled call is either fully applied or not applied. `update`, `cancel`,
/// `reschedule`, and `delete` are no-ops on a missing id at this level; the
/// handler pre-checks existence with `get`. That asymmetry is longstanding
/// observable behavior and is preserved deliberately.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Fetches a single event, failing with `NotFound` when the id is absent.
    async fn get(&self, id: &str) -> Result<Event, ApiError>;

    /// Lists events ordered by id ascending. The effective page size is
    /// `min(limit, MAX_LIST_LIMIT)`, with 0 mapping to `MAX_LIST_LIMIT`.
    /// `after` restricts to ids sorting strictly greater (cursor pagination);
    /// `name` restricts to case-insensitive substring matches, with every
    /// character of the filter taken literally (`%` and `_` carry no wildcard
    /// meaning in any backend). An empty result set is `Ok`.
    async fn list(&self, request: &ListRequest) -> Result<Vec<Event>, ApiError>;

    /// Persists a new event, assigning `id`, `status = original`, and
    /// `created_at`. Returns the stored event with those fields filled in.
    async fn create(&self, request: CreateRequest) -> Result<Event, ApiError>;

    /// Overwrites the editable fields and `updated_at` on the matching row.
    /// Status and slot are untouched.
    async fn update(&self, request: &UpdateRequest) -> Result<(), ApiError>;

    /// Marks the event canceled and stamps `canceled_at`.
    async fn cancel(&self, id: &str) -> Result<(), ApiError>;

    /// Replaces the slot, marks the event rescheduled, and stamps
    /// `rescheduled_at`. Slot ordering is not validated here.
    async fn reschedule(&self, id: &str, slot: TimeSlot) -> Result<(), ApiError>;

    /// Hard-removes the row.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Clamps a requested limit to the effective page size.
pub(crate) fn effective_limit(limit: usize) -> usize {
    use crate::models::MAX_LIST_LIMIT;

    if limit == 0 || limit > MAX_LIST_LIMIT {
        MAX_LIST_LIMIT
    } else {
        limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_clamping() {
        assert_eq!(effective_limit(0), 200);
        assert_eq!(effective_limit(1), 1);
        assert_eq!(effective_limit(200), 200);
        assert_eq!(effective_limit(201), 200);
        assert_eq!(effective_limit(usize::MAX), 200);
    }
}
