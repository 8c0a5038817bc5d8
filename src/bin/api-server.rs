//! Expo Screener API Server
//!
//! Dashboard HTTP API: screen a symbol list, fetch chart data, health and
//! metrics. Stateless; every request fetches fresh market data.

use dotenvy::dotenv;
use expo_screener::config::{get_environment, ScreenerConfig};
use expo_screener::core::http::start_server;
use expo_screener::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ScreenerConfig::from_env();
    let env = get_environment();
    info!("Starting Expo Screener API Server");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        fast_span = config.fast_span,
        slow_span = config.slow_span,
        lookback_days = config.lookback_days,
        "Trigger engine configuration"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(&config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
