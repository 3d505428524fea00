//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. All registration-table writes go
//! through [`RegistrationRepo`] so its invariants hold everywhere.

pub mod course_repo;
pub mod customer_repo;
pub mod event_repo;
pub mod registration_repo;

pub use course_repo::CourseRepo;
pub use customer_repo::CustomerRepo;
pub use event_repo::EventRepo;
pub use registration_repo::{RegisterOutcome, RegistrationRepo};
