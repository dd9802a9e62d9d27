use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use thiserror::Error;

use crate::dtos::ErrorResult;

/// Rejections of the donation payload. The `Display` text is what the
/// caller sees.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must be an integer (in cents).")]
    InvalidAmountType,
    #[error("Minimum donation is $25.")]
    AmountTooLow,
    #[error("Maximum donation exceeded.")]
    AmountTooHigh,
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("stripe error: {0}")]
    Stripe(#[from] stripe::StripeError),
    #[error("stripe did not respond within {0:?}")]
    Timeout(Duration),
    #[error("checkout session {0} was returned without a url")]
    MissingUrl(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("unable to create checkout session: {0}")]
    Gateway(#[from] GatewayError),
}

pub const CHECKOUT_FAILED_MESSAGE: &str = "Unable to create checkout session.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error.";
pub const NOT_FOUND_MESSAGE: &str = "Not found.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                tracing::debug!(%err, "rejected donation request");
                error_response(StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Gateway(err) => {
                tracing::error!(error = ?err, "error creating checkout session");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, CHECKOUT_FAILED_MESSAGE)
            }
        }
    }
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResult {
            error: message.into(),
        }),
    )
        .into_response()
}
