//! Entity models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus a `Deserialize` create DTO where this flow
//! inserts rows. Offerings (events, courses) are read-only here -- they are
//! owned by content management.

pub mod course;
pub mod customer;
pub mod event;
pub mod registration;
