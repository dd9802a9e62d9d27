use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use stripe::{
    CheckoutSession, Client, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData, CreateCheckoutSessionLineItemsPriceDataProductData,
};

use crate::error::GatewayError;
use crate::models::{CheckoutMode, CheckoutSessionRef, CheckoutSessionRequest, Currency, LineItem};

/// The payment processor as seen by the checkout handler.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn create_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> Result<CheckoutSessionRef, GatewayError>;
}

pub type CheckoutGatewayBox = Arc<dyn CheckoutGateway>;

/// Creates Checkout sessions through the Stripe API. Each call is bounded
/// by `timeout`.
pub struct StripeGateway {
    client: Client,
    timeout: Duration,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(Client::new(secret_key), timeout)
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl CheckoutGateway for StripeGateway {
    async fn create_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> Result<CheckoutSessionRef, GatewayError> {
        let params = CreateCheckoutSession {
            mode: Some(request.mode.into()),
            line_items: Some(request.line_items.iter().map(line_item).collect()),
            success_url: Some(&request.success_url),
            cancel_url: Some(&request.cancel_url),
            customer_email: request.customer_email.as_deref(),
            metadata: Some(request.metadata.clone().into_iter().collect()),
            ..Default::default()
        };

        let session = tokio::time::timeout(
            self.timeout,
            CheckoutSession::create(&self.client, params),
        )
        .await
        .map_err(|_| GatewayError::Timeout(self.timeout))??;

        let id = session.id.to_string();
        let url = session.url.ok_or_else(|| GatewayError::MissingUrl(id.clone()))?;
        tracing::info!(session_id = %id, "created checkout session");

        Ok(CheckoutSessionRef { id, url })
    }
}

fn line_item(item: &LineItem) -> CreateCheckoutSessionLineItems {
    CreateCheckoutSessionLineItems {
        price_data: Some(CreateCheckoutSessionLineItemsPriceData {
            currency: item.currency.into(),
            product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                name: item.product_name.clone(),
                ..Default::default()
            }),
            unit_amount: Some(item.unit_amount),
            ..Default::default()
        }),
        quantity: Some(item.quantity),
        ..Default::default()
    }
}

impl From<CheckoutMode> for stripe::CheckoutSessionMode {
    fn from(mode: CheckoutMode) -> Self {
        match mode {
            CheckoutMode::Payment => stripe::CheckoutSessionMode::Payment,
        }
    }
}

impl From<Currency> for stripe::Currency {
    fn from(currency: Currency) -> Self {
        match currency {
            Currency::Usd => stripe::Currency::USD,
        }
    }
}
