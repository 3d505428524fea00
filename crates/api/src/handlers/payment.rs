//! Handler for payment-processor callbacks.
//!
//! The processor redelivers notifications until it sees a success
//! acknowledgment, so the response is decoupled from the reconciliation
//! result: once the signature verifies and the payload parses, the handler
//! always acknowledges with 200, and ledger failures are only logged.
//! Rejections (non-200) are reserved for integrity failures -- a bad
//! signature or a payload we cannot attribute to a registration.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;

use impro_core::error::CoreError;
use impro_core::order_ref::OrderReference;
use impro_core::payment::{self, PaymentOutcome};
use impro_db::repositories::RegistrationRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Form-encoded callback body: `data` is base64 JSON, `signature` is the
/// processor's signature over it.
#[derive(Debug, Deserialize)]
pub struct CallbackForm {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

/// POST /api/v1/payments/callback
///
/// Verify and apply a server-to-server payment notification.
pub async fn callback(
    State(state): State<AppState>,
    Form(form): Form<CallbackForm>,
) -> AppResult<impl IntoResponse> {
    let (Some(data), Some(signature)) = (form.data, form.signature) else {
        return Err(CoreError::MalformedPayload("missing data or signature".into()).into());
    };

    // 1. Integrity: recompute the signature over the raw data string.
    if !payment::verify_signature(&state.config.payment.private_key, &data, &signature) {
        return Err(CoreError::InvalidSignature.into());
    }

    // 2. Decode base64 -> UTF-8 -> JSON.
    let payload = payment::decode_callback(&data)?;

    // 3. The order reference is the only linkage back to the registration.
    let reference = OrderReference::parse(&payload.order_id)?;

    // 4/5. Map the provider status and apply it best-effort.
    match payment::map_provider_status(&payload.status) {
        PaymentOutcome::Paid => {
            apply(
                RegistrationRepo::mark_paid(
                    &state.pool,
                    reference.kind,
                    reference.customer_id,
                    reference.offering_id,
                )
                .await,
                &reference,
                "paid",
            );
        }
        PaymentOutcome::Failed => {
            apply(
                RegistrationRepo::mark_failed(
                    &state.pool,
                    reference.kind,
                    reference.customer_id,
                    reference.offering_id,
                )
                .await,
                &reference,
                "failed",
            );
        }
        PaymentOutcome::Unrecognized => {
            tracing::warn!(
                order_id = %payload.order_id,
                status = %payload.status,
                "Unrecognized payment status, not applied"
            );
        }
    }

    // Acknowledge receipt regardless of the reconciliation outcome.
    Ok(Json(json!({ "status": "ok" })))
}

/// Log the result of a ledger transition without affecting the response.
fn apply(result: Result<u64, sqlx::Error>, reference: &OrderReference, status: &str) {
    match result {
        Ok(0) => tracing::warn!(
            order_id = %reference,
            status,
            "Callback matched no registration"
        ),
        Ok(_) => tracing::info!(
            order_id = %reference,
            status,
            "Registration status updated"
        ),
        Err(err) => tracing::error!(
            order_id = %reference,
            status,
            error = %err,
            "Failed to update registration from callback"
        ),
    }
}
