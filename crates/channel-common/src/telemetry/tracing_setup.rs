//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.
//! `RUST_LOG` always wins over the configured level.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Environment;

/// Per-crate directives appended to the base level
const QUIET_DEPENDENCIES: &[&str] = &["sqlx=warn", "hyper=warn", "tower_http=info", "redis=warn"];

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Base level filter
    pub level: Level,
    /// Enable JSON output format
    pub json: bool,
    /// Include span close events with timings
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Include thread IDs
    pub thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            thread_ids: false,
        }
    }
}

impl TracingConfig {
    /// Human-readable debug output
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            json: false,
            span_events: true,
            file_line: true,
            thread_ids: false,
        }
    }

    /// JSON lines for log shippers
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            json: true,
            span_events: false,
            file_line: false,
            thread_ids: true,
        }
    }

    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Production | Environment::Staging => Self::production(),
            Environment::Development => Self::development(),
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let mut directives = vec![self.level.to_string().to_lowercase()];
            directives.extend(QUIET_DEPENDENCIES.iter().map(ToString::to_string));
            EnvFilter::new(directives.join(","))
        })
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Try to initialize tracing with the default configuration
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(TracingConfig::default())
}

/// Try to initialize tracing with custom configuration
///
/// Returns `AlreadyInitialized` instead of panicking when a global subscriber exists,
/// so tests that spawn several servers can call it freely.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    let registry = tracing_subscriber::registry().with(config.filter());

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_file(config.file_line)
                    .with_line_number(config.file_line)
                    .with_thread_ids(config.thread_ids)
                    .with_span_events(config.span_events()),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_file(config.file_line)
                    .with_line_number(config.file_line)
                    .with_thread_ids(config.thread_ids)
                    .with_span_events(config.span_events()),
            )
            .try_init()
    };

    result.map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
