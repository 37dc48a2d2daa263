//! Notification preference entity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use motivator_core::result::AppResult;

use super::document::PreferenceDocument;
use super::time_of_day::ActiveWindow;
use super::time_slot::TimeSlot;
use super::weekday::Weekday;

/// Per-user notification schedule.
///
/// Persisted in its wire form, [`PreferenceDocument`]:
/// ```json
/// {
///   "enabled": true,
///   "startTime": "09:00",
///   "endTime": "21:00",
///   "days": ["monday", "wednesday", "friday"],
///   "timeSlots": ["morning", "evening"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "PreferenceDocument", into = "PreferenceDocument")]
pub struct NotificationPreference {
    /// Master switch. When `false` nothing fires.
    pub enabled: bool,
    /// Clock-time window in which notifications may be sent.
    pub active_window: ActiveWindow,
    /// Eligible weekdays. Empty means no day is eligible.
    pub active_days: BTreeSet<Weekday>,
    /// Eligible coarse buckets. Empty means no time is eligible.
    pub active_time_slots: BTreeSet<TimeSlot>,
}

impl NotificationPreference {
    /// Check every field that the type system does not already constrain.
    pub fn validate(&self) -> AppResult<()> {
        self.active_window.validate()
    }

    /// A copy with the master switch turned off and the schedule kept.
    pub fn disabled(&self) -> Self {
        Self {
            enabled: false,
            ..self.clone()
        }
    }

    /// Whether the schedule leaves at least one weekday and one bucket.
    pub fn has_schedule(&self) -> bool {
        !self.active_days.is_empty() && !self.active_time_slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::TimeOfDay;

    #[test]
    fn test_default_is_disabled_and_empty() {
        let pref = NotificationPreference::default();
        assert!(!pref.enabled);
        assert!(pref.active_days.is_empty());
        assert!(pref.active_time_slots.is_empty());
        assert_eq!(pref.active_window.start, TimeOfDay::MIDNIGHT);
        assert_eq!(pref.active_window.end, TimeOfDay::MIDNIGHT);
        assert!(!pref.has_schedule());
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let mut pref = NotificationPreference::default();
        pref.active_window.end = TimeOfDay { hour: 24, minute: 0 };
        assert!(pref.validate().is_err());
    }

    #[test]
    fn test_serializes_as_document() {
        let pref = NotificationPreference {
            enabled: true,
            active_window: ActiveWindow::new(
                TimeOfDay::new(9, 0).expect("time"),
                TimeOfDay::new(21, 0).expect("time"),
            ),
            active_days: [Weekday::Friday, Weekday::Monday].into_iter().collect(),
            active_time_slots: [TimeSlot::Evening, TimeSlot::Morning].into_iter().collect(),
        };

        let json = serde_json::to_value(&pref).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "enabled": true,
                "startTime": "09:00",
                "endTime": "21:00",
                "days": ["monday", "friday"],
                "timeSlots": ["morning", "evening"],
            })
        );

        let parsed: NotificationPreference = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, pref);
    }
}
