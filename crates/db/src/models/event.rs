//! Event entity model.

use serde::Serialize;
use sqlx::FromRow;

use impro_core::types::{DbId, Timestamp};

/// A row from the `events` table: a single-occurrence, spectator-facing
/// offering (show, jam, workshop).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    pub event_date: chrono::NaiveDate,
    pub event_time: chrono::NaiveTime,
    pub duration_minutes: Option<i32>,
    pub price: f64,
    /// `None` means unlimited.
    pub max_capacity: Option<i64>,
    pub created_at: Timestamp,
}
