//! Repository for the `courses` table (read-only).

use sqlx::PgPool;

use impro_core::types::DbId;

use crate::models::course::Course;

const COLUMNS: &str =
    "id, name, day_of_week, start_time, level, price, max_capacity, created_at";

/// Read access to courses. Rows are owned by content management; this flow
/// never inserts or mutates them.
pub struct CourseRepo;

impl CourseRepo {
    /// Find a course by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
