//! Channel API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p channel-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` when present).

use anyhow::Context;
use channel_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = ?e, "Server failed to start");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        redis = config.redis.is_some(),
        "Starting channel API server"
    );

    channel_api::run(config).await?;

    Ok(())
}
