//! Ports implemented by the infrastructure crates

mod infrastructure;
mod repositories;

pub use infrastructure::{ChannelCache, EventPublisher};
pub use repositories::*;
