//! Storage adapters for NestEgg.
//!
//! This crate provides:
//! - `MemoryStore`, an in-memory implementation of the core storage port
//!   with field-level unique constraints

pub mod memory;

pub use memory::{MemoryStore, MemoryTable};
