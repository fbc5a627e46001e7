//! PostgreSQL connection pool management

use std::path::Path;
use std::time::Duration;

use channel_common::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Directory holding the crate's SQL migrations
pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Idle connections are closed after this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Connections are recycled after this long
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Pool options derived from the application config
fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = pool_options(config).connect(&config.url).await?;

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "PostgreSQL pool connected"
    );

    Ok(pool)
}

/// Apply pending migrations from `dir`
pub async fn run_migrations(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await?;

    info!(dir = %dir.display(), "Database migrations applied");
    Ok(())
}

/// Round-trip a trivial query; used by readiness checks
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
