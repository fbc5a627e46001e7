//! # channel-service
//!
//! Application layer: authorization ladder, per-feature services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
