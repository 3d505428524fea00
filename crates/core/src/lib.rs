//! Domain layer for the registration and payment flow.
//!
//! Zero internal dependencies so it can be used by the repository layer,
//! the API server, and any future CLI tooling.

pub mod error;
pub mod offering;
pub mod order_ref;
pub mod payment;
pub mod types;
