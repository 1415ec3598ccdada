use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use super::{effective_limit, Clock, EventStore, IdGenerator};
use crate::models::{
    CreateRequest, Event, EventStatus, ListRequest, TimeSlot, UpdateRequest,
};
use crate::utils::ApiError;

/// Failures while bringing up the Postgres store. Returned to the caller so
/// the process decides how to react instead of panicking mid-construction.
#[derive(Debug, Error)]
pub enum StoreInitError {
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Postgres-backed `EventStore`. Row-level serialization is delegated to the
/// database; no in-process locking is needed.
pub struct PgEventStore {
    pool: PgPool,
    clock: Clock,
    ids: IdGenerator,
}

impl PgEventStore {
    /// Connects, provisions the schema, and returns a store using the wall
    /// clock.
    pub async fn connect(database_url: &str) -> Result<Self, StoreInitError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(StoreInitError::Connect)?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(StoreInitError::Migrate)?;

        Ok(Self::with_clock(pool, Utc::now))
    }

    /// Builds a store around an existing pool with an injected clock.
    pub fn with_clock(pool: PgPool, clock: Clock) -> Self {
        Self {
            pool,
            clock,
            ids: IdGenerator::new(clock),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

const EVENT_COLUMNS: &str = "id, name, description, website, address, phone_number, \
     start_time, end_time, status, created_at, updated_at, canceled_at, rescheduled_at";

/// Escapes `ILIKE` metacharacters so the name filter matches literally, the
/// same way the in-memory backend does. The backslash is Postgres's default
/// escape character.
fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Flat row shape for the `events` table; the nested `TimeSlot` is assembled
/// after the fetch.
#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    name: Option<String>,
    description: Option<String>,
    website: Option<String>,
    address: Option<String>,
    phone_number: Option<String>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    status: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    canceled_at: Option<DateTime<Utc>>,
    rescheduled_at: Option<DateTime<Utc>>,
}

impl TryFrom<EventRow> for Event {
    type Error = ApiError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let status: EventStatus = row.status.parse().map_err(ApiError::Internal)?;

        let slot = match (row.start_time, row.end_time) {
            (Some(start), Some(end)) => Some(TimeSlot { start, end }),
            _ => None,
        };

        Ok(Event {
            id: row.id,
            name: row.name,
            description: row.description,
            website: row.website,
            address: row.address,
            phone_number: row.phone_number,
            slot,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            canceled_at: row.canceled_at,
            rescheduled_at: row.rescheduled_at,
        })
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn get(&self, id: &str) -> Result<Event, ApiError> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");

        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound)?;

        row.try_into()
    }

    async fn list(&self, request: &ListRequest) -> Result<Vec<Event>, ApiError> {
        let limit = effective_limit(request.limit);

        // Empty cursor/filter arguments disable their predicate rather than
        // branching into separate queries.
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE ($1 = '' OR id > $1) \
               AND ($2 = '' OR name ILIKE '%' || $2 || '%') \
             ORDER BY id \
             LIMIT $3"
        );

        let rows = sqlx::query_as::<_, EventRow>(&query)
            .bind(&request.after)
            .bind(escape_like(&request.name))
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Event::try_from).collect()
    }

    async fn create(&self, request: CreateRequest) -> Result<Event, ApiError> {
        let mut event = request.event.ok_or(ApiError::MissingEvent)?;

        event.id = self.ids.generate();
        event.status = EventStatus::Original;
        event.created_at = Some(self.now());

        sqlx::query(
            "INSERT INTO events \
             (id, name, description, website, address, phone_number, \
              start_time, end_time, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.website)
        .bind(&event.address)
        .bind(&event.phone_number)
        .bind(event.slot.map(|s| s.start))
        .bind(event.slot.map(|s| s.end))
        .bind(event.status.as_str())
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update(&self, request: &UpdateRequest) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE events SET \
             name = $2, description = $3, website = $4, address = $5, \
             phone_number = $6, updated_at = $7 \
             WHERE id = $1",
        )
        .bind(&request.id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.website)
        .bind(&request.address)
        .bind(&request.phone_number)
        .bind(self.now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn cancel(&self, id: &str) -> Result<(), ApiError> {
        sqlx::query("UPDATE events SET status = $2, canceled_at = $3 WHERE id = $1")
            .bind(id)
            .bind(EventStatus::Canceled.as_str())
            .bind(self.now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn reschedule(&self, id: &str, slot: TimeSlot) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE events SET \
             start_time = $2, end_time = $3, status = $4, rescheduled_at = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(slot.start)
        .bind(slot.end)
        .bind(EventStatus::Rescheduled.as_str())
        .bind(self.now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_metacharacters_match_literally() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like(""), "");
    }
}
