//! Notification preference domain entities.

pub mod document;
pub mod preference;
pub mod time_of_day;
pub mod time_slot;
pub mod weekday;

pub use document::PreferenceDocument;
pub use preference::NotificationPreference;
pub use time_of_day::{ActiveWindow, TimeOfDay};
pub use time_slot::TimeSlot;
pub use weekday::Weekday;
