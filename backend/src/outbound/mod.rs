//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the driven ports:
//!
//! - **persistence**: PostgreSQL-backed stores using Diesel ORM
//! - **memory**: mutex-guarded stores for database-less runs and tests
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
