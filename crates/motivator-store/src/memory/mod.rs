//! In-memory preference store.

pub mod store;

pub use store::MemoryPreferenceStore;
