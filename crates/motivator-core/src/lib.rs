//! # motivator-core
//!
//! Core crate for Motivator. Contains the capability traits the
//! notification preference manager depends on (preference store, push
//! registrar, clock), configuration schemas, typed identifiers, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Motivator crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
