//! Typed order references.
//!
//! The payment processor only echoes back an opaque `order_id` string, so
//! the order reference is the sole linkage between a callback and its
//! registration. The wire format is `{kind}_{customerId}_{offeringId}`
//! (e.g. `event_42_7`), kept for processor compatibility; everything
//! outside this module works with the parsed struct.

use std::fmt;

use crate::error::CoreError;
use crate::offering::OfferingKind;
use crate::types::DbId;

/// A parsed `order_id`: which registration a payment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReference {
    pub kind: OfferingKind,
    pub customer_id: DbId,
    pub offering_id: DbId,
}

impl OrderReference {
    pub fn new(kind: OfferingKind, customer_id: DbId, offering_id: DbId) -> Self {
        Self {
            kind,
            customer_id,
            offering_id,
        }
    }

    /// Encode into the wire string sent to the processor.
    pub fn encode(&self) -> String {
        format!("{}_{}_{}", self.kind.as_str(), self.customer_id, self.offering_id)
    }

    /// Parse a wire string. Requires exactly three `_`-separated parts: a
    /// known kind and two numeric ids.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let mut parts = raw.split('_');
        let (Some(kind), Some(customer), Some(offering), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CoreError::MalformedPayload(format!(
                "order reference '{raw}' does not have exactly three parts"
            )));
        };

        let kind = OfferingKind::parse(kind).ok_or_else(|| {
            CoreError::MalformedPayload(format!("unknown offering kind '{kind}'"))
        })?;

        let customer_id: DbId = customer.parse().map_err(|_| {
            CoreError::MalformedPayload(format!("customer id '{customer}' is not numeric"))
        })?;

        let offering_id: DbId = offering.parse().map_err(|_| {
            CoreError::MalformedPayload(format!("offering id '{offering}' is not numeric"))
        })?;

        Ok(Self {
            kind,
            customer_id,
            offering_id,
        })
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
