//! Shared types, errors, and configuration for NestEgg.
//!
//! This crate provides common types used across all other crates:
//! - Typed numeric IDs for type-safe entity references
//! - The listing cap applied to unfiltered reads
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
