//! Server setup and initialization
//!
//! Provides the application builder, dependency wiring, and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use channel_cache::{Publisher, RedisChannelCache, RedisPool};
use channel_common::{AppConfig, AppError};
use channel_core::SnowflakeGenerator;
use channel_db::{create_pool, run_migrations, MIGRATIONS_DIR};
use channel_service::services::InviteService;
use channel_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::with_layers;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// How often expired invites are deactivated
const INVITE_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Build the complete Axum application with all routes and middleware
///
/// Health routes sit outside the rate limiter so health checks are never throttled.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = with_layers(create_router(), config)?;

    Ok(api.merge(health_routes()).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, MIGRATIONS_DIR.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let mut builder = ServiceContext::builder()
        .postgres(&pool)
        .snowflake_generator(snowflake_generator);

    let redis_pool = match &config.redis {
        Some(redis_config) => {
            info!("Connecting to Redis...");
            let redis_pool =
                RedisPool::connect(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;

            builder = builder.cache(Arc::new(RedisChannelCache::new(redis_pool.clone())));
            if config.events_active() {
                builder = builder.publisher(Arc::new(Publisher::new(
                    redis_pool.clone(),
                    config.events.channel.clone(),
                )));
                info!(channel = %config.events.channel, "Event publishing enabled");
            }
            Some(redis_pool)
        }
        None => {
            warn!("REDIS_URL not set; caching, typing indicators, and events are disabled");
            None
        }
    };

    let service_context = builder.build().map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool, redis_pool))
}

/// Periodically deactivate invites past their expiry
pub fn spawn_invite_sweeper(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(INVITE_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            match InviteService::new(state.service_context()).deactivate_expired_invites().await {
                Ok(0) => {}
                Ok(count) => info!(count, "Deactivated expired invites"),
                Err(e) => warn!(error = %e, "Invite sweep failed"),
            }
        }
    })
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    let sweeper = spawn_invite_sweeper(state.clone());

    let app = create_app(state)?;
    let result = run_server(app, &addr).await;

    sweeper.abort();
    result
}
