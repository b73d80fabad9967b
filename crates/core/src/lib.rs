//! GOOD CARE Core - domain entities, services, and traits.
//!
//! This crate contains the check-in, reward, leaderboard, and offline-sync
//! business logic. It is storage-agnostic: the remote primary store, the
//! local fallback store, and the connectivity probe are injected behind
//! traits implemented by the `goodcare-connect` and `goodcare-storage-sqlite`
//! crates.

pub mod checkins;
pub mod constants;
pub mod errors;
pub mod leaderboard;
pub mod sync;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
