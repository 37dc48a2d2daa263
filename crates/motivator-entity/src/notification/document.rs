//! External representation of a notification preference.

use serde::{Deserialize, Serialize};

use motivator_core::error::AppError;

use super::preference::NotificationPreference;
use super::time_of_day::{ActiveWindow, TimeOfDay};
use super::time_slot::TimeSlot;
use super::weekday::Weekday;

/// The preference as stored and exchanged: plain strings, 24-hour
/// zero-padded times.
///
/// `startTime` and `endTime` may be absent, in which case they read as
/// `00:00`. Unknown day or slot identifiers are rejected on conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceDocument {
    /// Master switch.
    pub enabled: bool,
    /// Window start as `"HH:MM"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Window end as `"HH:MM"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Weekday identifiers.
    #[serde(default)]
    pub days: Vec<String>,
    /// Time-slot identifiers.
    #[serde(default)]
    pub time_slots: Vec<String>,
}

impl TryFrom<PreferenceDocument> for NotificationPreference {
    type Error = AppError;

    fn try_from(doc: PreferenceDocument) -> Result<Self, Self::Error> {
        let parse_time = |value: Option<&String>| -> Result<TimeOfDay, AppError> {
            value.map_or(Ok(TimeOfDay::MIDNIGHT), |s| s.parse())
        };

        let start = parse_time(doc.start_time.as_ref())?;
        let end = parse_time(doc.end_time.as_ref())?;

        Ok(Self {
            enabled: doc.enabled,
            active_window: ActiveWindow::new(start, end),
            active_days: doc
                .days
                .iter()
                .map(|d| d.parse::<Weekday>())
                .collect::<Result<_, _>>()?,
            active_time_slots: doc
                .time_slots
                .iter()
                .map(|s| s.parse::<TimeSlot>())
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<NotificationPreference> for PreferenceDocument {
    fn from(pref: NotificationPreference) -> Self {
        Self::from(&pref)
    }
}

impl From<&NotificationPreference> for PreferenceDocument {
    fn from(pref: &NotificationPreference) -> Self {
        Self {
            enabled: pref.enabled,
            start_time: Some(pref.active_window.start.to_string()),
            end_time: Some(pref.active_window.end.to_string()),
            days: pref.active_days.iter().map(|d| d.to_string()).collect(),
            time_slots: pref
                .active_time_slots
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
