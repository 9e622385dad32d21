//! Core record-keeping logic for NestEgg.
//!
//! This crate contains pure business logic with ZERO storage engine or web
//! dependencies. Persistence goes through the [`store`] port, which the `db`
//! crate implements.
//!
//! # Modules
//!
//! - `auth` - Secret hashing and verification
//! - `clock` - Injected time source
//! - `domain` - Users, banks, accounts, investments, monthly expenses
//! - `email` - Email format checking
//! - `projection` - Age, retirement countdown and value trajectories
//! - `repository` - Validated, relation-resolving access to stored records
//! - `store` - Storage port
//! - `validation` - Fail-fast field rules

pub mod auth;
pub mod clock;
pub mod domain;
pub mod email;
pub mod projection;
pub mod repository;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repository::{Repositories, RepositoryContext, RepositoryError, RepositoryResult};
