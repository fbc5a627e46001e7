//! Domain events

mod channel_event;

pub use channel_event::{ChannelEvent, EventType};
