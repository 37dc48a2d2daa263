//! Capability traits defined in `motivator-core` and implemented by other crates.

pub mod clock;
pub mod registrar;
pub mod store;

pub use clock::Clock;
pub use registrar::{PushRegistrar, PushRegistration, RegistrationOutcome};
pub use store::PreferenceStore;
