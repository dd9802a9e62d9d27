use std::sync::Arc;

pub mod config;
pub mod dtos;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod routes;

use gateway::CheckoutGatewayBox;
use models::CheckoutSettings;

#[derive(Clone)]
pub struct AppState {
    pub gateway: CheckoutGatewayBox,
    pub checkout: Arc<CheckoutSettings>,
}

impl AppState {
    pub fn new(gateway: CheckoutGatewayBox, checkout: CheckoutSettings) -> Self {
        Self {
            gateway,
            checkout: Arc::new(checkout),
        }
    }
}
