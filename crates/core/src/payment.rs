//! Payment-processor wire format: signing, checkout payloads, and
//! callback decoding.
//!
//! The processor's hosted checkout accepts a base64-encoded JSON parameter
//! set (`data`) plus a signature computed as
//! `base64(sha1(private_key + data + private_key))`. The same scheme is
//! used symmetrically to verify inbound server-to-server callbacks, so the
//! exact digest and encoding are wire requirements, not design choices.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::CoreError;

/// Checkout API version the processor expects.
pub const CHECKOUT_VERSION: u8 = 3;

/// One-off payment action.
pub const ACTION_PAY: &str = "pay";

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Compute the processor signature for an encoded payload.
pub fn sign(private_key: &str, data: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(private_key.as_bytes());
    hasher.update(data.as_bytes());
    hasher.update(private_key.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Verify an inbound callback signature by recomputing it over the raw
/// `data` string.
pub fn verify_signature(private_key: &str, data: &str, signature: &str) -> bool {
    sign(private_key, data) == signature
}

// ---------------------------------------------------------------------------
// Checkout session
// ---------------------------------------------------------------------------

/// Parameter set for the processor's hosted checkout.
///
/// Serialized to JSON, base64-encoded into `data`, and signed. The client
/// submits `data` + `signature` to the checkout URL via an auto-submitting
/// form post.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub version: u8,
    pub public_key: String,
    pub action: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub order_id: String,
    /// Browser redirect target after payment.
    pub result_url: String,
    /// Server-to-server callback endpoint.
    pub server_url: String,
}

/// The signed pair the client forwards to the processor.
#[derive(Debug, Clone, Serialize)]
pub struct SignedCheckout {
    pub data: String,
    pub signature: String,
}

impl CheckoutRequest {
    /// Encode and sign this request with the shared private key.
    pub fn into_signed(self, private_key: &str) -> Result<SignedCheckout, CoreError> {
        let json = serde_json::to_string(&self)
            .map_err(|e| CoreError::Internal(format!("checkout serialization failed: {e}")))?;
        let data = BASE64.encode(json);
        let signature = sign(private_key, &data);
        Ok(SignedCheckout { data, signature })
    }
}

// ---------------------------------------------------------------------------
// Callback decoding
// ---------------------------------------------------------------------------

/// Fields of a callback notification this flow acts on. The processor
/// sends many more; they are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackPayload {
    pub order_id: String,
    pub status: String,
}

/// Decode a callback `data` field: base64 -> UTF-8 -> JSON.
///
/// Signature verification must happen *before* decoding, over the raw
/// string as received.
pub fn decode_callback(data: &str) -> Result<CallbackPayload, CoreError> {
    let bytes = BASE64
        .decode(data)
        .map_err(|e| CoreError::MalformedPayload(format!("invalid base64: {e}")))?;

    let text = String::from_utf8(bytes)
        .map_err(|e| CoreError::MalformedPayload(format!("payload is not UTF-8: {e}")))?;

    serde_json::from_str(&text)
        .map_err(|e| CoreError::MalformedPayload(format!("invalid callback JSON: {e}")))
}

// ---------------------------------------------------------------------------
// Provider status mapping
// ---------------------------------------------------------------------------

/// Internal interpretation of a provider payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Payment confirmed (`success`, or `subscribed` for recurring).
    Paid,
    /// Payment explicitly declined or errored.
    Failed,
    /// Any other provider status; logged and not applied.
    Unrecognized,
}

/// Map a provider status string to its internal outcome.
pub fn map_provider_status(status: &str) -> PaymentOutcome {
    match status {
        "success" | "subscribed" => PaymentOutcome::Paid,
        "failure" | "error" => PaymentOutcome::Failed,
        _ => PaymentOutcome::Unrecognized,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
