//! SQLite storage implementation for GOOD CARE.
//!
//! This crate provides the local fallback store and the pending-sync queue
//! using Diesel ORM with SQLite. It implements the offline-facing traits
//! defined in `goodcare-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The offline check-in/stats mirror
//! - The pending-sync queue with its dropped-item audit trail
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. All other crates (`core`, `connect`) are database-agnostic and work
//! with traits.

pub mod checkins;
pub mod db;
pub mod errors;
pub mod queue;
pub mod schema;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from goodcare-core for convenience
pub use goodcare_core::errors::{DatabaseError, Error, Result};
