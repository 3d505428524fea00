//! Handler for registration submissions.
//!
//! Orchestrates the full flow: validate input, resolve the customer by
//! email, load the offering, reserve a slot in the ledger, and return the
//! signed checkout payload the client forwards to the processor.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use impro_core::error::CoreError;
use impro_core::offering::OfferingKind;
use impro_core::order_ref::OrderReference;
use impro_core::payment::{CheckoutRequest, ACTION_PAY, CHECKOUT_VERSION};
use impro_core::types::DbId;
use impro_db::models::customer::{CreateCustomer, Customer};
use impro_db::repositories::{CourseRepo, CustomerRepo, EventRepo, RegisterOutcome, RegistrationRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /registrations`.
///
/// Exactly one of `selectedEventId` / `selectedCourseId` must be present.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    // Missing fields deserialize to empty strings so every validation
    // failure surfaces as a 400 from the same place.
    #[serde(default)]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    /// Optional phone number ("number" on the wire, a form-field legacy).
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub selected_event_id: Option<DbId>,
    #[serde(default)]
    pub selected_course_id: Option<DbId>,
}

/// Signed checkout parameters returned on success. The client submits
/// `data` + `signature` to `checkoutUrl` via an auto-submitting form post.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub order_reference: String,
    pub data: String,
    pub signature: String,
    pub checkout_url: String,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/registrations
///
/// Create a `pending` registration and return the signed payment session.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RegistrationRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Field validation.
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let (kind, offering_id) = match (input.selected_event_id, input.selected_course_id) {
        (Some(id), None) => (OfferingKind::Event, id),
        (None, Some(id)) => (OfferingKind::Course, id),
        _ => {
            return Err(CoreError::Validation(
                "Exactly one of selectedEventId or selectedCourseId must be provided".into(),
            )
            .into())
        }
    };

    // 2. Load the offering. The UI only offers existing ids, so a miss is
    //    an internal inconsistency, not a user error.
    let (amount, max_capacity, description) = match kind {
        OfferingKind::Event => {
            let event = EventRepo::find_by_id(&state.pool, offering_id)
                .await?
                .ok_or_else(|| AppError::InternalError(format!("event {offering_id} not found")))?;
            (
                event.price,
                event.max_capacity,
                format!("Registration for {}", event.name),
            )
        }
        OfferingKind::Course => {
            let course = CourseRepo::find_by_id(&state.pool, offering_id)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(format!("course {offering_id} not found"))
                })?;
            let amount = state
                .config
                .payment
                .course_flat_price
                .unwrap_or(course.price);
            (
                amount,
                course.max_capacity,
                format!("Registration for {}", course.name),
            )
        }
    };

    // 3. Resolve the customer by email.
    let customer = resolve_customer(&state, &input).await?;

    // 4. Reserve a slot: transactional capacity check + pending insert.
    let outcome =
        RegistrationRepo::register(&state.pool, kind, customer.id, offering_id, max_capacity)
            .await?;

    let registration = match outcome {
        RegisterOutcome::Created(registration) => registration,
        RegisterOutcome::AlreadyRegistered => {
            return Err(CoreError::AlreadyRegistered {
                kind,
                id: offering_id,
            }
            .into())
        }
        RegisterOutcome::Full => {
            tracing::info!(%kind, offering_id, "Registration rejected: offering full");
            return Err(CoreError::OfferingFull {
                kind,
                id: offering_id,
            }
            .into());
        }
        RegisterOutcome::OfferingMissing => {
            return Err(AppError::InternalError(format!(
                "{kind} {offering_id} vanished during registration"
            )))
        }
    };

    tracing::info!(
        %kind,
        offering_id,
        customer_id = customer.id,
        registration_id = registration.id,
        "Created pending registration"
    );

    // 5. Build the signed checkout session.
    let payment = &state.config.payment;
    let order_reference = OrderReference::new(kind, customer.id, offering_id).encode();

    let signed = CheckoutRequest {
        version: CHECKOUT_VERSION,
        public_key: payment.public_key.clone(),
        action: ACTION_PAY.into(),
        amount,
        currency: payment.currency.clone(),
        description,
        order_id: order_reference.clone(),
        result_url: payment.result_url.clone(),
        server_url: payment.callback_url.clone(),
    }
    .into_signed(&payment.private_key)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RegistrationResponse {
                order_reference,
                data: signed.data,
                signature: signed.signature,
                checkout_url: payment.checkout_url.clone(),
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Customer resolution
// ---------------------------------------------------------------------------

/// Find the customer by exact email match, inserting a new row on a miss.
///
/// An existing customer is returned unchanged: submitted name/phone changes
/// are not applied on repeat visits. Two first-time registrations racing on
/// the same email are settled by `uq_customers_email` -- the loser re-reads
/// the winner's row.
async fn resolve_customer(
    state: &AppState,
    input: &RegistrationRequest,
) -> Result<Customer, AppError> {
    if let Some(existing) = CustomerRepo::find_by_email(&state.pool, &input.email).await? {
        return Ok(existing);
    }

    let create = CreateCustomer {
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        email: input.email.clone(),
        phone: normalize_phone(input.number.as_deref()),
    };

    match CustomerRepo::create(&state.pool, &create).await {
        Ok(customer) => {
            tracing::info!(customer_id = customer.id, "Created new customer");
            Ok(customer)
        }
        Err(err) if is_unique_violation(&err) => CustomerRepo::find_by_email(&state.pool, &input.email)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("customer insert conflicted but row is absent".into())
            }),
        Err(err) => Err(err.into()),
    }
}

/// Strip a leading `@`/`#` and surrounding whitespace; empty becomes `None`.
fn normalize_phone(raw: Option<&str>) -> Option<String> {
    let cleaned = raw?.trim().trim_start_matches(['@', '#']).trim().to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// PostgreSQL unique constraint violation (error code 23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
