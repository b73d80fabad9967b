//! GOOD CARE Connect - cloud store adapter.
//!
//! This crate talks to the GOOD CARE cloud API, the primary store for
//! check-ins, stats, profiles, and the leaderboard. It implements the store
//! traits defined in `goodcare-core`; the error mapping distinguishes the
//! store being *unreachable* (which triggers the offline fallback) from the
//! store *rejecting* a write (which never does).

mod client;
mod store;
mod types;

pub use client::{CareApiClient, DEFAULT_CLOUD_API_URL};
pub use store::RemoteCareStore;
