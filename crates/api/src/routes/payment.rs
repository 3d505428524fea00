//! Route definitions for payment-processor callbacks.

use axum::routing::post;
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST /callback  -> server-to-server notification from the processor
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/callback", post(payment::callback))
}
