//! Redis Pub/Sub module.
//!
//! Outbound event distribution for committed channel state changes.

mod channels;
mod publisher;

pub use channels::PubSubChannel;
pub use publisher::Publisher;
