//! Repository for the `events` table (read-only).

use sqlx::PgPool;

use impro_core::types::DbId;

use crate::models::event::Event;

const COLUMNS: &str =
    "id, name, event_date, event_time, duration_minutes, price, max_capacity, created_at";

/// Read access to events. Rows are owned by content management; this flow
/// never inserts or mutates them.
pub struct EventRepo;

impl EventRepo {
    /// Find an event by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
