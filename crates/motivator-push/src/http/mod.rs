//! HTTP push registrar.

pub mod registrar;

pub use registrar::HttpPushRegistrar;
