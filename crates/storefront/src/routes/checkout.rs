//! Checkout route handlers.
//!
//! Guard rejections are answered with `200 OK`: the rejection is part of the
//! normal flow and is carried in the response next to the updated form
//! errors and toasts. Only malformed requests produce an error status.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::checkout::{GuardRejection, Transition};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::CurrentCheckout;
use crate::sessions::SessionView;
use crate::validation::{FormField, parse_payment_method};

/// Session view plus the outcome of a phase intent.
#[derive(Debug, Serialize)]
pub struct IntentResponse {
    #[serde(flatten)]
    pub session: SessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    /// Why the intent was refused, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

impl IntentResponse {
    fn from_outcome(
        session: SessionView,
        outcome: std::result::Result<Transition, GuardRejection>,
    ) -> Self {
        match outcome {
            Ok(transition) => Self {
                session,
                transition: Some(transition),
                rejection: None,
            },
            Err(rejection) => {
                tracing::debug!(%rejection, "Checkout intent rejected");
                Self {
                    session,
                    transition: None,
                    rejection: Some(rejection.to_string()),
                }
            }
        }
    }
}

/// Body for a single form field edit.
#[derive(Debug, Deserialize)]
pub struct FieldRequest {
    pub field: String,
    pub value: String,
}

/// Body for choosing the payment method.
#[derive(Debug, Deserialize)]
pub struct PaymentMethodRequest {
    pub method: String,
}

/// Current session view.
#[instrument(skip_all)]
pub async fn show(CurrentCheckout(shared): CurrentCheckout) -> Json<SessionView> {
    Json(shared.lock().await.view())
}

/// Open the checkout view at the cart step.
#[instrument(skip_all)]
pub async fn open(CurrentCheckout(shared): CurrentCheckout) -> Json<SessionView> {
    let mut entry = shared.lock().await;
    entry.session.open_checkout();
    Json(entry.view())
}

/// Hide the checkout view.
#[instrument(skip_all)]
pub async fn close(CurrentCheckout(shared): CurrentCheckout) -> Json<SessionView> {
    let mut entry = shared.lock().await;
    entry.session.close_checkout();
    Json(entry.view())
}

/// Cart icon: open or close the checkout view.
#[instrument(skip_all)]
pub async fn toggle(CurrentCheckout(shared): CurrentCheckout) -> Json<SessionView> {
    let mut entry = shared.lock().await;
    entry.session.toggle_checkout();
    Json(entry.view())
}

/// Move to the next step if the current one is complete.
#[instrument(skip_all)]
pub async fn advance(CurrentCheckout(shared): CurrentCheckout) -> Json<IntentResponse> {
    let mut entry = shared.lock().await;
    let outcome = entry.session.advance();
    if let Ok(Transition::Moved { to, .. }) = outcome {
        add_breadcrumb("checkout", &format!("Advanced to {to}"));
    }
    Json(IntentResponse::from_outcome(entry.view(), outcome))
}

/// Go back one step.
#[instrument(skip_all)]
pub async fn retreat(CurrentCheckout(shared): CurrentCheckout) -> Json<IntentResponse> {
    let mut entry = shared.lock().await;
    let outcome = entry.session.retreat();
    Json(IntentResponse::from_outcome(entry.view(), Ok(outcome)))
}

/// Finish after confirmation: clear the cart and close the view.
#[instrument(skip_all)]
pub async fn acknowledge(CurrentCheckout(shared): CurrentCheckout) -> Json<IntentResponse> {
    let mut entry = shared.lock().await;
    let outcome = entry.session.acknowledge_confirmation();
    Json(IntentResponse::from_outcome(entry.view(), Ok(outcome)))
}

/// Edit one delivery or payment field.
#[instrument(skip_all, fields(field = %body.field))]
pub async fn set_field(
    CurrentCheckout(shared): CurrentCheckout,
    Json(body): Json<FieldRequest>,
) -> Result<Json<SessionView>> {
    let field: FormField = body.field.parse()?;
    let mut entry = shared.lock().await;
    entry.session.set_field(field, body.value);
    Ok(Json(entry.view()))
}

/// Choose card or QR payment. Only honoured on the payment step.
#[instrument(skip_all, fields(method = %body.method))]
pub async fn set_payment_method(
    CurrentCheckout(shared): CurrentCheckout,
    Json(body): Json<PaymentMethodRequest>,
) -> Result<Json<IntentResponse>> {
    let method = parse_payment_method(&body.method)?;
    let mut entry = shared.lock().await;
    let phase = entry.session.phase();
    let outcome = entry
        .session
        .set_payment_method(method)
        .map(|()| Transition::Stayed { phase });
    Ok(Json(IntentResponse::from_outcome(entry.view(), outcome)))
}
