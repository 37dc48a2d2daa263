//! Coarse time-of-day buckets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use motivator_core::error::AppError;

use super::time_of_day::{ActiveWindow, TimeOfDay};

/// One of four fixed partitions of the day.
///
/// Boundaries are half-open and together cover every minute exactly once:
///
/// | Bucket | Range |
/// |---|---|
/// | `morning` | `[06:00, 12:00)` |
/// | `afternoon` | `[12:00, 18:00)` |
/// | `evening` | `[18:00, 22:00)` |
/// | `night` | `[22:00, 06:00)`, wrapping midnight |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    /// 06:00 to 12:00.
    Morning,
    /// 12:00 to 18:00.
    Afternoon,
    /// 18:00 to 22:00.
    Evening,
    /// 22:00 to 06:00.
    Night,
}

impl TimeSlot {
    /// Every bucket in chronological order starting at 06:00.
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    /// Return the bucket identifier used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// The bucket that contains the given clock time.
    pub fn containing(t: TimeOfDay) -> Self {
        match t.hour {
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            18..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// The bucket's bounds as a window.
    pub fn window(&self) -> ActiveWindow {
        let at = |hour| TimeOfDay { hour, minute: 0 };
        match self {
            Self::Morning => ActiveWindow::new(at(6), at(12)),
            Self::Afternoon => ActiveWindow::new(at(12), at(18)),
            Self::Evening => ActiveWindow::new(at(18), at(22)),
            Self::Night => ActiveWindow::new(at(22), at(6)),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| {
                AppError::unknown_enum(format!(
                    "Unknown time slot '{s}'. Expected one of: morning, afternoon, evening, night"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().expect("valid time")
    }

    #[test]
    fn test_half_open_boundaries() {
        assert_eq!(TimeSlot::containing(t("11:59")), TimeSlot::Morning);
        assert_eq!(TimeSlot::containing(t("12:00")), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::containing(t("05:59")), TimeSlot::Night);
        assert_eq!(TimeSlot::containing(t("06:00")), TimeSlot::Morning);
        assert_eq!(TimeSlot::containing(t("17:59")), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::containing(t("18:00")), TimeSlot::Evening);
        assert_eq!(TimeSlot::containing(t("21:59")), TimeSlot::Evening);
        assert_eq!(TimeSlot::containing(t("22:00")), TimeSlot::Night);
        assert_eq!(TimeSlot::containing(t("00:00")), TimeSlot::Night);
    }

    #[test]
    fn test_windows_partition_the_day() {
        for minute in 0..(24 * 60) {
            let time = TimeOfDay {
                hour: (minute / 60) as u8,
                minute: (minute % 60) as u8,
            };
            let holders: Vec<TimeSlot> = TimeSlot::ALL
                .into_iter()
                .filter(|slot| slot.window().contains(time))
                .collect();
            assert_eq!(holders, vec![TimeSlot::containing(time)], "at {time}");
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("night".parse::<TimeSlot>().expect("parse"), TimeSlot::Night);
        assert!("dawn".parse::<TimeSlot>().is_err());
    }
}
