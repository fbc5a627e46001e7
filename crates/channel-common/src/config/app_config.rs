//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Absent when `REDIS_URL` is unset; cache and events are then disabled
    pub redis: Option<RedisConfig>,
    pub events: EventsConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Event stream configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_events_channel")]
    pub channel: String,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// `*` allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "channel-service".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3003
}

fn default_max_connections() -> u32 {
    25
}

fn default_min_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_events_channel() -> String {
    "channel-events".to_string()
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604800 // 7 days
}

fn default_requests_per_second() -> u32 {
    50
}

fn default_burst() -> u32 {
    100
}

/// Read and parse an optional variable, falling back to `default` when unset
fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        Err(_) => Ok(default),
    }
}

fn required_var(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or unparsable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env_name = env::var("ENVIRONMENT").unwrap_or_default();
        let app_env = if env_name.is_empty() {
            Environment::default()
        } else {
            Environment::parse(&env_name)
                .ok_or(ConfigError::InvalidValue("ENVIRONMENT", env_name))?
        };

        let redis = match env::var("REDIS_URL") {
            Ok(url) if !url.trim().is_empty() => Some(RedisConfig {
                url,
                max_connections: parse_var(
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections(),
                )?,
            }),
            _ => None,
        };

        let worker_id: u16 = parse_var("WORKER_ID", 0)?;
        if worker_id > channel_core::MAX_WORKER_ID {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: app_env,
            },
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("PORT", default_port())?,
            },
            database: DatabaseConfig {
                url: required_var("DATABASE_URL")?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", default_min_connections())?,
                connect_timeout_secs: parse_var(
                    "DATABASE_CONNECT_TIMEOUT",
                    default_connect_timeout(),
                )?,
                run_migrations: parse_var("DATABASE_RUN_MIGRATIONS", true)?,
            },
            redis,
            events: EventsConfig {
                enabled: parse_var("EVENTS_ENABLED", true)?,
                channel: env::var("EVENTS_CHANNEL").unwrap_or_else(|_| default_events_channel()),
            },
            jwt: JwtConfig {
                secret: required_var("JWT_SECRET")?,
                access_token_expiry: parse_var(
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    default_access_token_expiry(),
                )?,
                refresh_token_expiry: parse_var(
                    "JWT_REFRESH_TOKEN_EXPIRY",
                    default_refresh_token_expiry(),
                )?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(
                    "RATE_LIMIT_PER_SECOND",
                    default_requests_per_second(),
                )?,
                burst: parse_var("RATE_LIMIT_BURST", default_burst())?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_else(|| vec!["*".to_string()]),
            },
            snowflake: SnowflakeConfig { worker_id },
        })
    }

    /// Whether events should be published (needs Redis)
    #[must_use]
    pub fn events_active(&self) -> bool {
        self.events.enabled && self.redis.is_some()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
