//! Promise tracking: explicit commitments with their own deadline,
//! independent of the owning action's due date.

use crate::dates;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Today at the work-end time ("HH:MM", default 17:00).
pub fn calculate_eod(work_end_time: Option<&str>, today: NaiveDate) -> NaiveDateTime {
    today.and_time(dates::parse_work_end(work_end_time))
}

/// The upcoming Sunday (today, if today is Sunday) at the work-end time.
pub fn calculate_end_of_week(work_end_time: Option<&str>, today: NaiveDate) -> NaiveDateTime {
    let days_ahead = (7 - today.weekday().num_days_from_sunday()) % 7;
    let sunday = today + Duration::days(i64::from(days_ahead));
    sunday.and_time(dates::parse_work_end(work_end_time))
}

/// Strictly past: false when the promise lands on this exact instant.
pub fn is_promise_overdue(promised_due_at: NaiveDateTime, now: NaiveDateTime) -> bool {
    promised_due_at < now
}

/// Display formatting for a promise deadline. Uses whole days on the raw
/// timestamps, so a promise missed earlier today already reads overdue.
pub fn format_promise(promised_due_at: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff_days = dates::whole_days_between(now, promised_due_at);
    match diff_days {
        d if d < -1 => format!("overdue by {} days", -d),
        -1 => "overdue by 1 day".to_string(),
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        2..=7 => format!("by {}", promised_due_at.format("%A")),
        _ => format!("by {}", promised_due_at.format("%B %-d, %Y")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
