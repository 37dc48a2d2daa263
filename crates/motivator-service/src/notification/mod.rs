//! Notification preference management and eligibility rules.

pub mod eligibility;
pub mod manager;

pub use eligibility::{is_eligible_at, next_eligible_at};
pub use manager::NotificationPreferenceManager;
