//! JSON-file preference store.

pub mod store;

pub use store::FilePreferenceStore;
