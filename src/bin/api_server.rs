use satellite_image_api::api::{create_router, AppState, RequestSettings};
use satellite_image_api::config::{ServiceAccountCredentials, ServiceConfig};
use satellite_image_api::{telemetry, EarthEngineClient};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = telemetry::init(&config.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: ServiceConfig) -> satellite_image_api::Result<()> {
    let credentials = ServiceAccountCredentials::from_env()?;
    let client = EarthEngineClient::connect(&credentials, &config).await?;
    let state = AppState::new(client, RequestSettings::from_config(&config)?);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        environment = %config.environment,
        "Satellite Image API listening on http://{}",
        address
    );
    info!(
        "  GET  /satellite?latitude=<lat>&longitude=<lon>&hectares=<ha>\
         &start_date=<YYYY-MM-DD>&end_date=<YYYY-MM-DD>"
    );
    info!("  GET  /health");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
