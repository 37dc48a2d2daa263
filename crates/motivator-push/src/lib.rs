//! # motivator-push
//!
//! Push registrar implementations for Motivator. Supports two modes:
//!
//! - **local**: tokens issued in-process, one per (user, device)
//! - **http**: registration delegated to a remote endpoint over HTTP via
//!   [reqwest](https://crates.io/crates/reqwest)
//!
//! The registrar is selected at runtime based on configuration.

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "local")]
pub mod local;
pub mod provider;

pub use provider::RegistrarManager;
