//! Cookie session server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p session-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use session_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // The only .env load; AppConfig::from_env reads the resulting process environment
    dotenvy::dotenv().ok();

    // Log format follows APP_ENV; read it before the full config so load errors are logged
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse::<Environment>().ok())
        .unwrap_or_default();

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting cookie session server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        backend = ?config.store.backend,
        address = %config.server.address(),
        "Configuration loaded"
    );

    session_api::run(config).await?;

    Ok(())
}
