//! # motivator-store
//!
//! Preference store implementations for Motivator. Supports three modes:
//!
//! - **memory**: In-process map using [dashmap](https://crates.io/crates/dashmap)
//! - **file**: A single JSON document on local disk
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The backend is selected at runtime based on configuration.

#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
