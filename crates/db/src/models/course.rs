//! Course entity model.

use serde::Serialize;
use sqlx::FromRow;

use impro_core::types::{DbId, Timestamp};

/// A row from the `courses` table: a recurring, participant-facing
/// offering with a weekly slot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub day_of_week: String,
    pub start_time: chrono::NaiveTime,
    pub level: Option<String>,
    pub price: f64,
    /// `None` means unlimited.
    pub max_capacity: Option<i64>,
    pub created_at: Timestamp,
}
