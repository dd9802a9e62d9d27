use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::ValidationError;

pub const MIN_DONATION_CENTS: i64 = 2_500;
pub const MAX_DONATION_CENTS: i64 = 1_000_000;
pub const DONATION_PRODUCT_NAME: &str = "Donation to CFRC";
pub const METADATA_SOURCE_KEY: &str = "source";
pub const METADATA_SOURCE: &str = "github-pages-cfrc-fundraiser";

/// A donation amount in cents, always within
/// `[MIN_DONATION_CENTS, MAX_DONATION_CENTS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DonationAmount(i64);

impl DonationAmount {
    /// Validates a raw JSON value. Integral floats such as `2500.0` are
    /// accepted as integers.
    pub fn parse(value: &Value) -> Result<Self, ValidationError> {
        let cents = integer_value(value).ok_or(ValidationError::InvalidAmountType)?;
        Self::check(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    fn check(cents: i128) -> Result<Self, ValidationError> {
        if cents < i128::from(MIN_DONATION_CENTS) {
            return Err(ValidationError::AmountTooLow);
        }
        if cents > i128::from(MAX_DONATION_CENTS) {
            return Err(ValidationError::AmountTooHigh);
        }
        Ok(Self(cents as i64))
    }
}

fn integer_value(value: &Value) -> Option<i128> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n.into());
    }
    if let Some(n) = number.as_u64() {
        return Some(n.into());
    }
    // `as` saturates, which keeps huge integral floats above the maximum.
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i128)
}

/// Only a non-empty string is used to prefill the checkout email.
pub fn prefill_email(value: &Value) -> Option<String> {
    match value {
        Value::String(email) if !email.is_empty() => Some(email.clone()),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    Payment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub currency: Currency,
    pub product_name: String,
    pub unit_amount: i64,
    pub quantity: u64,
}

/// Redirect targets every session is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub success_url: String,
    pub cancel_url: String,
}

/// What gets sent to the payment processor for one donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionRequest {
    pub mode: CheckoutMode,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

impl CheckoutSessionRequest {
    pub fn donation(
        amount: DonationAmount,
        customer_email: Option<String>,
        settings: &CheckoutSettings,
    ) -> Self {
        Self {
            mode: CheckoutMode::Payment,
            line_items: vec![LineItem {
                currency: Currency::Usd,
                product_name: DONATION_PRODUCT_NAME.to_string(),
                unit_amount: amount.cents(),
                quantity: 1,
            }],
            success_url: settings.success_url.clone(),
            cancel_url: settings.cancel_url.clone(),
            customer_email,
            metadata: BTreeMap::from([(
                METADATA_SOURCE_KEY.to_string(),
                METADATA_SOURCE.to_string(),
            )]),
        }
    }
}

/// Session id and redirect url as returned by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionRef {
    pub id: String,
    pub url: String,
}
