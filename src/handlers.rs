use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Json, Response},
};
use serde_json::Value;
use std::any::Any;

use crate::dtos::{CreateCheckoutSessionRequest, CreateCheckoutSessionResult, HealthResult};
use crate::error::{error_response, AppError, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE};
use crate::models::{prefill_email, CheckoutSessionRequest, DonationAmount};
use crate::AppState;

pub const SERVICE_NAME: &str = "cfrc-stripe-backend";

pub async fn health() -> Json<HealthResult> {
    Json(HealthResult {
        ok: true,
        service: SERVICE_NAME.to_string(),
    })
}

pub async fn create_checkout_session(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreateCheckoutSessionResult>, AppError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable checkout request body");
            Value::Null
        }
    };
    let request = CreateCheckoutSessionRequest::from_body(body);

    let amount = DonationAmount::parse(&request.amount)?;
    let session_request =
        CheckoutSessionRequest::donation(amount, prefill_email(&request.email), &state.checkout);

    let session = state.gateway.create_session(session_request).await?;

    Ok(Json(CreateCheckoutSessionResult {
        id: session.id,
        url: session.url,
    }))
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

/// Last resort for panics raised while handling a request.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };
    tracing::error!(panic = detail, "unhandled error");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
}
