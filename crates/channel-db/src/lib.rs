//! # channel-db
//!
//! Database layer implementing the channel-core repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use channel_common::AppConfig;
//! use channel_core::ChannelRepository;
//! use channel_db::{create_pool, run_migrations, PgChannelRepository, MIGRATIONS_DIR};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool, MIGRATIONS_DIR.as_ref()).await?;
//!
//!     let channels = PgChannelRepository::new(pool);
//!     let found = channels.find_by_id(42.into()).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, ping, run_migrations, PgPool, MIGRATIONS_DIR};
pub use repositories::{
    PgActivityLogRepository, PgAnnouncementRepository, PgBookmarkRepository, PgChannelRepository,
    PgFollowerRepository, PgInviteRepository, PgLinkRepository, PgMemberRepository,
    PgModerationRepository, PgPermissionRepository, PgPinRepository, PgPollRepository,
    PgReactionRepository, PgReadReceiptRepository, PgScheduledMessageRepository,
    PgSectionRepository, PgSettingsRepository, PgStarredRepository, PgTabRepository,
    PgTemplateRepository, PgThreadRepository, PgVoiceRepository, PgWebhookRepository,
};
