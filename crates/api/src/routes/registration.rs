//! Route definitions for registrations.

use axum::routing::post;
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// POST /  -> create (validate, reserve a slot, return signed checkout)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(registration::create))
}
