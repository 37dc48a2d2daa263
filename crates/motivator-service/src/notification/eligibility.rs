//! Pure eligibility rules: may a notification fire at a given instant?
//!
//! Nothing here performs I/O, so a dispatch job can evaluate stored
//! preferences with exactly the rules the client uses.

use chrono::{DateTime, Datelike, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;

use motivator_entity::notification::{NotificationPreference, TimeOfDay, TimeSlot, Weekday};

/// How far ahead [`next_eligible_at`] searches, in days. Eight covers a
/// full week plus any DST shift.
const SEARCH_HORIZON_DAYS: i64 = 8;

/// Decide whether `preference` allows a notification at `instant`, with
/// local clock time and weekday taken in `timezone`.
///
/// All of these must hold:
/// 1. the preference is enabled;
/// 2. the local weekday is in `active_days`;
/// 3. the bucket containing the local time is in `active_time_slots`;
/// 4. the local time is inside `active_window`.
pub fn is_eligible_at(
    preference: &NotificationPreference,
    instant: DateTime<Utc>,
    timezone: Tz,
) -> bool {
    if !preference.enabled {
        return false;
    }

    let local = instant.with_timezone(&timezone);

    let day = Weekday::from(local.weekday());
    if !preference.active_days.contains(&day) {
        return false;
    }

    let time = TimeOfDay::from_naive(local.time());
    if !preference.active_time_slots.contains(&TimeSlot::containing(time)) {
        return false;
    }

    preference.active_window.contains(time)
}

/// The earliest instant at or after `from` at which [`is_eligible_at`]
/// holds, or `None` if there is none within the next eight days.
pub fn next_eligible_at(
    preference: &NotificationPreference,
    from: DateTime<Utc>,
    timezone: Tz,
) -> Option<DateTime<Utc>> {
    if !preference.enabled || !preference.has_schedule() {
        return None;
    }

    if is_eligible_at(preference, from, timezone) {
        return Some(from);
    }

    let minute_start = from.with_second(0)?.with_nanosecond(0)?;
    let deadline = from + TimeDelta::days(SEARCH_HORIZON_DAYS);

    let mut candidate = minute_start + TimeDelta::minutes(1);
    while candidate <= deadline {
        if is_eligible_at(preference, candidate, timezone) {
            return Some(candidate);
        }
        candidate += TimeDelta::minutes(1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use motivator_entity::notification::ActiveWindow;

    fn t(s: &str) -> TimeOfDay {
        s.parse().expect("valid time")
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    fn every_day_every_slot(start: &str, end: &str) -> NotificationPreference {
        NotificationPreference {
            enabled: true,
            active_window: ActiveWindow::new(t(start), t(end)),
            active_days: Weekday::ALL.into_iter().collect(),
            active_time_slots: TimeSlot::ALL.into_iter().collect(),
        }
    }

    // 2026-03-02 is a Monday.

    #[test]
    fn test_daytime_window() {
        let pref = every_day_every_slot("09:00", "21:00");
        assert!(is_eligible_at(&pref, at("2026-03-02T10:00:00Z"), Tz::UTC));
        assert!(!is_eligible_at(&pref, at("2026-03-02T22:00:00Z"), Tz::UTC));
        assert!(!is_eligible_at(&pref, at("2026-03-02T21:00:00Z"), Tz::UTC));
    }

    #[test]
    fn test_midnight_wrap_window() {
        let pref = every_day_every_slot("22:00", "06:00");
        assert!(is_eligible_at(&pref, at("2026-03-02T23:30:00Z"), Tz::UTC));
        assert!(!is_eligible_at(&pref, at("2026-03-02T12:00:00Z"), Tz::UTC));
        assert!(is_eligible_at(&pref, at("2026-03-03T05:59:00Z"), Tz::UTC));
    }

    #[test]
    fn test_disabled_never_eligible() {
        let pref = every_day_every_slot("00:00", "23:59").disabled();
        let start = at("2026-03-02T00:00:00Z");
        for minute in 0..(7 * 24 * 60) {
            let instant = start + TimeDelta::minutes(minute);
            assert!(!is_eligible_at(&pref, instant, Tz::UTC), "at {instant}");
        }
    }

    #[test]
    fn test_empty_days_never_eligible() {
        let mut pref = every_day_every_slot("00:00", "23:59");
        pref.active_days.clear();
        let start = at("2026-03-02T00:00:00Z");
        for minute in (0..(7 * 24 * 60)).step_by(7) {
            let instant = start + TimeDelta::minutes(minute);
            assert!(!is_eligible_at(&pref, instant, Tz::Europe__Istanbul), "at {instant}");
        }
    }

    #[test]
    fn test_weekday_uses_local_calendar() {
        let mut pref = every_day_every_slot("00:00", "23:59");
        pref.active_days = [Weekday::Tuesday].into_iter().collect();

        // Monday 23:30 UTC is already Tuesday 02:30 in Istanbul (UTC+3).
        let instant = at("2026-03-02T23:30:00Z");
        assert!(!is_eligible_at(&pref, instant, Tz::UTC));
        assert!(is_eligible_at(&pref, instant, Tz::Europe__Istanbul));
    }

    #[test]
    fn test_slot_and_window_both_required() {
        let mut pref = every_day_every_slot("09:00", "21:00");
        pref.active_time_slots = [TimeSlot::Morning, TimeSlot::Evening].into_iter().collect();

        assert!(is_eligible_at(&pref, at("2026-03-02T11:59:00Z"), Tz::UTC));
        // Inside the window, but afternoon is not selected.
        assert!(!is_eligible_at(&pref, at("2026-03-02T12:00:00Z"), Tz::UTC));
        assert!(is_eligible_at(&pref, at("2026-03-02T20:30:00Z"), Tz::UTC));
        // Evening is selected, but 21:30 is outside the window.
        assert!(!is_eligible_at(&pref, at("2026-03-02T21:30:00Z"), Tz::UTC));
    }

    #[test]
    fn test_dst_shift_follows_local_time() {
        let mut pref = every_day_every_slot("09:00", "10:00");
        pref.active_time_slots = [TimeSlot::Morning].into_iter().collect();
        let tz = Tz::Europe__Berlin;

        // Winter: 09:30 local is 08:30 UTC. Summer: 09:30 local is 07:30 UTC.
        assert!(is_eligible_at(&pref, at("2026-01-15T08:30:00Z"), tz));
        assert!(!is_eligible_at(&pref, at("2026-07-15T08:30:00Z"), tz));
        assert!(is_eligible_at(&pref, at("2026-07-15T07:30:00Z"), tz));
    }

    #[test]
    fn test_next_eligible_same_instant() {
        let pref = every_day_every_slot("09:00", "21:00");
        let from = at("2026-03-02T10:15:30Z");
        assert_eq!(next_eligible_at(&pref, from, Tz::UTC), Some(from));
    }

    #[test]
    fn test_next_eligible_later_in_week() {
        let mut pref = every_day_every_slot("18:30", "21:00");
        pref.active_days = [Weekday::Friday].into_iter().collect();
        pref.active_time_slots = [TimeSlot::Evening].into_iter().collect();

        let next = next_eligible_at(&pref, at("2026-03-02T10:15:30Z"), Tz::UTC);
        assert_eq!(next, Some(at("2026-03-06T18:30:00Z")));
    }

    #[test]
    fn test_next_eligible_none_when_unreachable() {
        // Window and slot never overlap.
        let mut pref = every_day_every_slot("09:00", "11:00");
        pref.active_time_slots = [TimeSlot::Evening].into_iter().collect();
        assert_eq!(next_eligible_at(&pref, at("2026-03-02T00:00:00Z"), Tz::UTC), None);

        let disabled = every_day_every_slot("09:00", "11:00").disabled();
        assert_eq!(next_eligible_at(&disabled, at("2026-03-02T00:00:00Z"), Tz::UTC), None);
    }
}
