//! Route modules and the `/api/v1` route table.

pub mod health;
pub mod payment;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/registrations", registration::router())
        .nest("/payments", payment::router())
}
