//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven ports backed by PostgreSQL via
//! Diesel with async support through `diesel-async` and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Permission and lifecycle rules live in the domain
//!   services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Atomic versioning**: tender version bumps and their history rows are
//!   written in one transaction.
//! - **Strongly typed errors**: pool and Diesel failures map onto each port's
//!   `Connection` and `Query` variants.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mockable::DefaultClock;
//! use tender_backend::outbound::persistence::{DbPool, DieselTenderRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tender")).await?;
//! let tenders = DieselTenderRepository::new(pool, Arc::new(DefaultClock));
//! ```

mod diesel_basic_error_mapping;
mod diesel_bid_repository;
mod diesel_tender_repository;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bid_repository::DieselBidRepository;
pub use diesel_tender_repository::DieselTenderRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
