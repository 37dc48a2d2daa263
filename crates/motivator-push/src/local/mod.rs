//! In-process push registrar.

pub mod registrar;

pub use registrar::LocalPushRegistrar;
