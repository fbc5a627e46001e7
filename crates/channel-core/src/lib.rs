//! # channel-core
//!
//! Domain layer containing entities, value objects, repository traits, and channel events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::*;
pub use error::DomainError;
pub use events::{ChannelEvent, EventType};
pub use traits::*;
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError, MAX_WORKER_ID};
