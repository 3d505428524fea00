//! Repository for the `customers` table.

use sqlx::PgPool;

use crate::models::customer::{CreateCustomer, Customer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, phone, created_at";

/// Lookup and insert operations for customers.
///
/// Customers are never updated or deleted by the registration flow: a
/// repeat visit with a known email reuses the stored row as-is, even if the
/// submitted name or phone differ.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Find a customer by exact email match.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE email = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new customer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (first_name, last_name, email, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }
}
