//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, token validator, and the backing pools used by readiness checks.

use std::sync::Arc;

use channel_cache::RedisPool;
use channel_common::{AppConfig, JwtService};
use channel_db::PgPool;
use channel_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    jwt_service: Arc<JwtService>,
    pool: PgPool,
    /// `None` when Redis is not configured
    redis_pool: Option<RedisPool>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        pool: PgPool,
        redis_pool: Option<RedisPool>,
    ) -> Self {
        let jwt_service = JwtService::from_config(&config.jwt);
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            jwt_service: Arc::new(jwt_service),
            pool,
            redis_pool,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT validator
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("redis", &self.redis_pool.is_some())
            .finish()
    }
}
