//! Registration entity model.
//!
//! Registrations are persisted in two parallel tables of identical shape
//! (`event_registrations`, `course_registrations`). Queries alias the
//! offering foreign key to `offering_id` so both tables map onto this one
//! struct, tagged with an `OfferingKind` at the call site.

use serde::Serialize;
use sqlx::FromRow;

use impro_core::types::{DbId, Timestamp};

/// A row from `event_registrations` or `course_registrations`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub customer_id: DbId,
    /// The `event_id` / `course_id` column, aliased.
    pub offering_id: DbId,
    pub payment_status: String,
    pub registered_at: Timestamp,
}

/// Lifecycle states of a registration.
///
/// `pending` is created at registration time; the payment callback moves it
/// to `paid` or `failed` (both terminal). Failed rows are kept, not
/// deleted, so repeated attempts leave an audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// The TEXT value stored in `payment_status` columns.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl Registration {
    /// Whether this row counts against capacity.
    pub fn is_active(&self) -> bool {
        self.payment_status == PaymentStatus::Pending.as_str()
            || self.payment_status == PaymentStatus::Paid.as_str()
    }
}
