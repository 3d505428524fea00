//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope, except the payment
//! callback acknowledgment whose body shape is fixed by the processor.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
