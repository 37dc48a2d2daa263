//! # motivator-entity
//!
//! Domain value types for Motivator. Every type in this crate is a plain
//! value object: the notification preference a user owns, the clock and
//! calendar types it is built from, and the wire document it is persisted
//! as. All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod notification;

pub use notification::{
    ActiveWindow, NotificationPreference, PreferenceDocument, TimeOfDay, TimeSlot, Weekday,
};
