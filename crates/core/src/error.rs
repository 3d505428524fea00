use crate::offering::OfferingKind;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("This {kind} is full")]
    OfferingFull { kind: OfferingKind, id: DbId },

    #[error("You are already registered for this {kind}")]
    AlreadyRegistered { kind: OfferingKind, id: DbId },

    #[error("Callback signature does not match the payload")]
    InvalidSignature,

    #[error("Malformed callback payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
