//! Repository for the registration ledger.
//!
//! One repository serves both physical tables (`event_registrations`,
//! `course_registrations`); every query is parameterized on the
//! [`OfferingKind`] tag. This module must remain the only write path to
//! the registration tables: the invariants below are enforced here and by
//! the `uq_*_registrations_active` partial unique indexes.
//!
//! Invariants:
//! - at most one active (`pending` or `paid`) row per (customer, offering)
//! - the active count for an offering never exceeds its capacity
//! - a `paid` row is never demoted

use sqlx::{PgPool, Postgres, Transaction};

use impro_core::offering::OfferingKind;
use impro_core::types::DbId;

use crate::models::registration::Registration;

/// Result of a registration attempt.
#[derive(Debug)]
pub enum RegisterOutcome {
    /// A fresh `pending` row was inserted.
    Created(Registration),
    /// A `paid` row already exists for the pair, or a concurrent attempt
    /// won the unique-index race.
    AlreadyRegistered,
    /// The offering's capacity is exhausted.
    Full,
    /// No offering row with the given id exists.
    OfferingMissing,
}

/// Table and foreign-key column for a registration kind.
fn target(kind: OfferingKind) -> (&'static str, &'static str) {
    match kind {
        OfferingKind::Event => ("event_registrations", "event_id"),
        OfferingKind::Course => ("course_registrations", "course_id"),
    }
}

/// Offering table a registration kind locks against.
fn offering_table(kind: OfferingKind) -> &'static str {
    match kind {
        OfferingKind::Event => "events",
        OfferingKind::Course => "courses",
    }
}

/// `RETURNING` / `SELECT` list mapping either table onto [`Registration`].
fn columns(fk: &str) -> String {
    format!("id, customer_id, {fk} AS offering_id, payment_status, registered_at")
}

/// Ledger operations over the registration tables.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Register a customer for an offering, creating a `pending` row.
    ///
    /// Runs as a single transaction that locks the offering row, so the
    /// capacity check and the insert cannot interleave with a concurrent
    /// attempt for the same offering:
    ///
    /// 1. `SELECT ... FOR UPDATE` on the offering (missing -> `OfferingMissing`)
    /// 2. existing `paid` row for the pair -> `AlreadyRegistered`
    /// 3. delete any stale `pending` row for the pair
    /// 4. `max_capacity` set and active count >= capacity -> `Full`
    /// 5. insert the new `pending` row
    ///
    /// A duplicate that still slips through (a payment callback marking
    /// the pair `paid` between step 2 and step 5) hits the partial unique
    /// index and is reported as `AlreadyRegistered`.
    pub async fn register(
        pool: &PgPool,
        kind: OfferingKind,
        customer_id: DbId,
        offering_id: DbId,
        max_capacity: Option<i64>,
    ) -> Result<RegisterOutcome, sqlx::Error> {
        let (table, fk) = target(kind);
        let mut tx = pool.begin().await?;

        if !lock_offering(&mut tx, kind, offering_id).await? {
            return Ok(RegisterOutcome::OfferingMissing);
        }

        let paid_exists: Option<(DbId,)> = sqlx::query_as(&format!(
            "SELECT id FROM {table}
             WHERE customer_id = $1 AND {fk} = $2 AND payment_status = 'paid'"
        ))
        .bind(customer_id)
        .bind(offering_id)
        .fetch_optional(&mut *tx)
        .await?;

        if paid_exists.is_some() {
            return Ok(RegisterOutcome::AlreadyRegistered);
        }

        // Abandoned-attempt cleanup: the new pending row replaces the old one.
        sqlx::query(&format!(
            "DELETE FROM {table}
             WHERE customer_id = $1 AND {fk} = $2 AND payment_status = 'pending'"
        ))
        .bind(customer_id)
        .bind(offering_id)
        .execute(&mut *tx)
        .await?;

        if let Some(capacity) = max_capacity {
            let (active,): (i64,) = sqlx::query_as(&format!(
                "SELECT COUNT(*) FROM {table}
                 WHERE {fk} = $1 AND payment_status IN ('pending', 'paid')"
            ))
            .bind(offering_id)
            .fetch_one(&mut *tx)
            .await?;

            if active >= capacity {
                return Ok(RegisterOutcome::Full);
            }
        }

        let inserted = sqlx::query_as::<_, Registration>(&format!(
            "INSERT INTO {table} (customer_id, {fk}, payment_status)
             VALUES ($1, $2, 'pending')
             RETURNING {}",
            columns(fk)
        ))
        .bind(customer_id)
        .bind(offering_id)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(registration) => {
                tx.commit().await?;
                Ok(RegisterOutcome::Created(registration))
            }
            Err(err) if is_unique_violation(&err) => {
                tracing::warn!(
                    %kind,
                    customer_id,
                    offering_id,
                    "Concurrent duplicate registration attempt lost the unique-index race"
                );
                Ok(RegisterOutcome::AlreadyRegistered)
            }
            Err(err) => Err(err),
        }
    }

    /// Transition the pair's active registration to `paid`.
    ///
    /// Idempotent: the `WHERE` clause matches both `pending` and already
    /// `paid` rows, so redelivered confirmations land on the same final
    /// state. Returns the number of rows touched (0 means no matching
    /// registration; the caller logs it).
    pub async fn mark_paid(
        pool: &PgPool,
        kind: OfferingKind,
        customer_id: DbId,
        offering_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let (table, fk) = target(kind);
        let result = sqlx::query(&format!(
            "UPDATE {table} SET payment_status = 'paid'
             WHERE customer_id = $1 AND {fk} = $2
               AND payment_status IN ('pending', 'paid')"
        ))
        .bind(customer_id)
        .bind(offering_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Transition the pair's `pending` registration to `failed`.
    ///
    /// Failed rows are kept rather than deleted. A `paid` row is never
    /// demoted, so a late failure notification after a success is a no-op.
    pub async fn mark_failed(
        pool: &PgPool,
        kind: OfferingKind,
        customer_id: DbId,
        offering_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let (table, fk) = target(kind);
        let result = sqlx::query(&format!(
            "UPDATE {table} SET payment_status = 'failed'
             WHERE customer_id = $1 AND {fk} = $2 AND payment_status = 'pending'"
        ))
        .bind(customer_id)
        .bind(offering_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count registrations that hold a slot (`pending` or `paid`).
    pub async fn count_active(
        pool: &PgPool,
        kind: OfferingKind,
        offering_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (table, fk) = target(kind);
        let (count,): (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM {table}
             WHERE {fk} = $1 AND payment_status IN ('pending', 'paid')"
        ))
        .bind(offering_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Fetch the pair's active registration, if any.
    pub async fn find_active(
        pool: &PgPool,
        kind: OfferingKind,
        customer_id: DbId,
        offering_id: DbId,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let (table, fk) = target(kind);
        sqlx::query_as::<_, Registration>(&format!(
            "SELECT {} FROM {table}
             WHERE customer_id = $1 AND {fk} = $2
               AND payment_status IN ('pending', 'paid')",
            columns(fk)
        ))
        .bind(customer_id)
        .bind(offering_id)
        .fetch_optional(pool)
        .await
    }

    /// List every registration row for the pair, oldest first. Includes
    /// terminal `failed` rows.
    pub async fn list_for_pair(
        pool: &PgPool,
        kind: OfferingKind,
        customer_id: DbId,
        offering_id: DbId,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let (table, fk) = target(kind);
        sqlx::query_as::<_, Registration>(&format!(
            "SELECT {} FROM {table}
             WHERE customer_id = $1 AND {fk} = $2
             ORDER BY registered_at",
            columns(fk)
        ))
        .bind(customer_id)
        .bind(offering_id)
        .fetch_all(pool)
        .await
    }
}

/// Lock the offering row for the duration of the transaction, serializing
/// registration attempts per offering. Returns `false` if no such row.
async fn lock_offering(
    tx: &mut Transaction<'_, Postgres>,
    kind: OfferingKind,
    offering_id: DbId,
) -> Result<bool, sqlx::Error> {
    let table = offering_table(kind);
    let locked: Option<(DbId,)> =
        sqlx::query_as(&format!("SELECT id FROM {table} WHERE id = $1 FOR UPDATE"))
            .bind(offering_id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(locked.is_some())
}

/// PostgreSQL unique constraint violation (error code 23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
