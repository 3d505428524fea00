//! Customer entity model and DTOs.
//!
//! Customers are keyed by email: the first registration attempt for an
//! unknown email inserts a row, later attempts reuse it unchanged.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use impro_core::types::{DbId, Timestamp};

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}
