//! Wall-clock time of day and the circular window built from it.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use motivator_core::error::AppError;
use motivator_core::result::AppResult;

/// A wall-clock time with minute precision.
///
/// Fields are public so that callers can build candidates freely;
/// [`TimeOfDay::validate`] rejects out-of-range values before anything
/// is persisted. Serialized as a zero-padded `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    /// Hour, `0..=23`.
    pub hour: u8,
    /// Minute, `0..=59`.
    pub minute: u8,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Create a validated time of day.
    pub fn new(hour: u8, minute: u8) -> AppResult<Self> {
        let time = Self { hour, minute };
        time.validate()?;
        Ok(time)
    }

    /// Check that both fields are in range.
    pub fn validate(&self) -> AppResult<()> {
        if self.hour > 23 {
            return Err(AppError::invalid_time(format!(
                "Hour {} is out of range 0-23",
                self.hour
            )));
        }
        if self.minute > 59 {
            return Err(AppError::invalid_time(format!(
                "Minute {} is out of range 0-59",
                self.minute
            )));
        }
        Ok(())
    }

    /// Truncate a chrono time to minute precision.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed =
            || AppError::invalid_time(format!("Invalid time '{s}'. Expected 24-hour HH:MM"));

        let (hh, mm) = s.split_once(':').ok_or_else(malformed)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hh) || !two_digits(mm) {
            return Err(malformed());
        }

        let hour = hh.parse::<u8>().map_err(|_| malformed())?;
        let minute = mm.parse::<u8>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> String {
        time.to_string()
    }
}

/// The clock-time interval during which notifications may be sent.
///
/// The interval is half-open, `[start, end)`. When `start > end` it wraps
/// past midnight. When `start == end` it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActiveWindow {
    /// First eligible minute.
    pub start: TimeOfDay,
    /// First minute after the window.
    pub end: TimeOfDay,
}

impl ActiveWindow {
    /// Create a window from its bounds.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Whether the window crosses midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    /// Test whether `t` falls inside the window.
    pub fn contains(&self, t: TimeOfDay) -> bool {
        if self.start <= self.end {
            self.start <= t && t < self.end
        } else {
            t >= self.start || t < self.end
        }
    }

    /// Check both bounds.
    pub fn validate(&self) -> AppResult<()> {
        self.start.validate()?;
        self.end.validate()
    }
}

impl fmt::Display for ActiveWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motivator_core::error::ErrorKind;

    fn t(s: &str) -> TimeOfDay {
        s.parse().expect("valid time")
    }

    #[test]
    fn test_parse_and_display() {
        let time = t("07:05");
        assert_eq!(time, TimeOfDay { hour: 7, minute: 5 });
        assert_eq!(time.to_string(), "07:05");
        assert_eq!(time.minutes_since_midnight(), 425);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["7:05", "0705", "07:5", "ab:cd", "", "07:05:00", "+7:05"] {
            let err = bad.parse::<TimeOfDay>().unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidTimeValue, "input {bad:?}");
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(
            "24:00".parse::<TimeOfDay>().unwrap_err().kind,
            ErrorKind::InvalidTimeValue
        );
        assert_eq!(
            "12:60".parse::<TimeOfDay>().unwrap_err().kind,
            ErrorKind::InvalidTimeValue
        );
    }

    #[test]
    fn test_validate_public_fields() {
        let bad = TimeOfDay { hour: 25, minute: 0 };
        assert!(bad.validate().is_err());
        let bad = TimeOfDay { hour: 3, minute: 99 };
        assert!(bad.validate().is_err());
        assert!(TimeOfDay { hour: 23, minute: 59 }.validate().is_ok());
    }

    #[test]
    fn test_plain_window() {
        let window = ActiveWindow::new(t("09:00"), t("21:00"));
        assert!(!window.wraps_midnight());
        assert!(window.contains(t("09:00")));
        assert!(window.contains(t("10:00")));
        assert!(window.contains(t("20:59")));
        assert!(!window.contains(t("21:00")));
        assert!(!window.contains(t("22:00")));
        assert!(!window.contains(t("08:59")));
    }

    #[test]
    fn test_wrapping_window() {
        let window = ActiveWindow::new(t("22:00"), t("06:00"));
        assert!(window.wraps_midnight());
        assert!(window.contains(t("23:30")));
        assert!(window.contains(t("00:00")));
        assert!(window.contains(t("05:59")));
        assert!(!window.contains(t("06:00")));
        assert!(!window.contains(t("12:00")));
        assert!(window.contains(t("22:00")));
    }

    #[test]
    fn test_equal_bounds_is_empty() {
        let window = ActiveWindow::default();
        assert!(!window.contains(t("00:00")));
        assert!(!window.contains(t("12:00")));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&t("06:30")).expect("serialize");
        assert_eq!(json, "\"06:30\"");
        let parsed: Result<TimeOfDay, _> = serde_json::from_str("\"6:30\"");
        assert!(parsed.is_err());
    }
}
