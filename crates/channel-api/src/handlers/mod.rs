//! Route handlers
//!
//! All HTTP request handlers organized by feature area.

pub mod activity;
pub mod announcements;
pub mod channels;
pub mod governance;
pub mod health;
pub mod invites;
pub mod layout;
pub mod members;
pub mod moderation;
pub mod pins;
pub mod polls;
pub mod presence;
pub mod reactions;
pub mod scheduled;
pub mod social;
pub mod templates;
pub mod threads;
