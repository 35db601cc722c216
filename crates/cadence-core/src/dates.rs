//! Shared date normalization.
//!
//! Two kinds of arithmetic, never mixed:
//!   - calendar days: both sides normalized to local midnight (`NaiveDate`),
//!     used for due-date and snooze math;
//!   - whole days: floor of the exact difference between two timestamps,
//!     used for promise display and stall detection.
//!
//! All timestamps are wall-clock in the caller's local timezone. The caller
//! supplies `now`; nothing in this crate reads the system clock.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const SECS_PER_DAY: i64 = 86_400;

pub const DEFAULT_WORK_END_HOUR: u32 = 17;
pub const DEFAULT_WORK_END_MINUTE: u32 = 0;

/// Calendar days from `from` to `to` (both already at local midnight).
/// Positive when `to` is later.
pub fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Days a due date is past `now`'s calendar day. Positive = overdue,
/// 0 = due today, negative = in the future.
pub fn days_overdue(due_date: NaiveDate, now: NaiveDateTime) -> i64 {
    calendar_days_between(due_date, now.date())
}

/// Floor of the exact difference between two timestamps, in days.
/// `whole_days_between(now, promise)` is negative once the promise has
/// slipped even one second into the past.
pub fn whole_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_seconds().div_euclid(SECS_PER_DAY)
}

/// Parse a "HH:MM" work-end time. Hour and minute are parsed independently;
/// each component that is missing or unparsable falls back to its default
/// (17:00) without raising an error.
pub fn parse_work_end(raw: Option<&str>) -> NaiveTime {
    let raw = raw.unwrap_or("");
    let mut parts = raw.splitn(2, ':');
    let hour = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|h| *h < 24)
        .unwrap_or(DEFAULT_WORK_END_HOUR);
    let minute = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|m| *m < 60)
        .unwrap_or(DEFAULT_WORK_END_MINUTE);
    // Components are range-checked above, so this cannot fail.
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
