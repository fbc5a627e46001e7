//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects. Text
//! columns holding enumerations go through the lenient `From<&str>` impls on
//! the core enums, so an unknown value degrades to the default variant.

mod channel;
mod governance;
mod layout;
mod member;
mod message;
mod moderation;
mod poll;
mod presence;
mod thread;
