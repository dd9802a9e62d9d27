use cfrc_stripe_backend::{
    config::Config, gateway::StripeGateway, routes::create_routes, AppState,
};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cfrc_stripe_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let stripe_gateway =
        StripeGateway::new(config.stripe_secret_key.clone(), config.stripe_timeout);
    let app_state = AppState::new(Arc::new(stripe_gateway), config.checkout_settings());

    let app = create_routes(app_state, config.allowed_origin.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Stripe server listening on {addr}");
    axum::serve(listener, app).await
}
