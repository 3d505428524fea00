//! Request handlers.

pub mod payment;
pub mod registration;
