use serde_json::Value;

/// Body of `POST /create-checkout-session`. Fields stay raw JSON so that a
/// wrongly typed amount surfaces as a validation failure.
#[derive(Debug, Default, PartialEq)]
pub struct CreateCheckoutSessionRequest {
    pub amount: Value,
    pub email: Value,
}

impl CreateCheckoutSessionRequest {
    /// Anything other than a JSON object is treated as an empty body.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                amount: fields.remove("amount").unwrap_or_default(),
                email: fields.remove("email").unwrap_or_default(),
            },
            _ => Self::default(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct CreateCheckoutSessionResult {
    pub id: String,
    pub url: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct HealthResult {
    pub ok: bool,
    pub service: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResult {
    pub error: String,
}
