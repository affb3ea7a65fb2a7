use dotenv::dotenv;
use iris_gateway::{AppState, Gateway, GatewayConfig, Provider, ServerConfig, server};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let gateway_config = GatewayConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    let gateway = Gateway::new(gateway_config)?;
    for provider in Provider::ALL {
        if !gateway.is_configured(provider) {
            warn!(
                %provider,
                env_var = provider.default_api_key_env_var(),
                "API key not set, requests for this provider will fail"
            );
        }
    }

    let address = server_config.address();
    let listener = TcpListener::bind(&address).await?;

    info!(%address, "Iris gateway listening");

    let state = AppState::new(gateway).with_max_body_bytes(server_config.max_body_bytes);
    server::serve(listener, state).await?;

    Ok(())
}
