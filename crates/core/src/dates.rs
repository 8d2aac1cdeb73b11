//! Week and day arithmetic for the calendar grid.
//!
//! Weeks are Monday-anchored. All functions operate on [`Day`] values, which
//! carry no time-of-day and no time zone.
//!
//! Arithmetic never panics at the ends of the representable calendar:
//! [`add_days`] clamps to [`Day::MIN`]/[`Day::MAX`], [`week_days`] stops at
//! the last representable day and week navigation returns `None` when the
//! target week does not exist.

use chrono::{Datelike, Days, Utc};

use crate::error::CoreError;
use crate::types::{Day, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of days shown in the calendar grid.
pub const DAYS_PER_WEEK: usize = 7;

/// `YYYY-MM-DD`.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Week arithmetic
// ---------------------------------------------------------------------------

/// Return the Monday of the week containing `date`.
///
/// In the first week of the calendar the Monday may precede [`Day::MIN`];
/// the result is then clamped to `Day::MIN`.
pub fn start_of_week(date: Day) -> Day {
    let offset = date.weekday().num_days_from_monday();
    add_days(date, -i64::from(offset))
}

/// `date` shifted by `days`, or `None` if the result is out of range.
pub fn checked_add_days(date: Day, days: i64) -> Option<Day> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// Return `date` shifted by `days` (may be negative), saturating at
/// [`Day::MIN`] and [`Day::MAX`].
pub fn add_days(date: Day, days: i64) -> Day {
    checked_add_days(date, days).unwrap_or(if days >= 0 { Day::MAX } else { Day::MIN })
}

/// List up to `len` consecutive days starting at `start`. The list is cut
/// short at [`Day::MAX`].
pub fn week_days(start: Day, len: usize) -> Vec<Day> {
    (0..len as i64)
        .map_while(|i| checked_add_days(start, i))
        .collect()
}

/// Monday of the week after the one starting at `week_start`, or `None`
/// past the end of the calendar.
pub fn next_week(week_start: Day) -> Option<Day> {
    checked_add_days(week_start, DAYS_PER_WEEK as i64).map(start_of_week)
}

/// Monday of the week before the one starting at `week_start`, or `None`
/// before the start of the calendar.
pub fn previous_week(week_start: Day) -> Option<Day> {
    checked_add_days(week_start, -(DAYS_PER_WEEK as i64)).map(start_of_week)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a day as `YYYY-MM-DD`.
pub fn iso_date(date: Day) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Calendar day of an instant, taken in UTC.
///
/// An instant near midnight local time can land on the neighbouring day.
/// Callers must not rely on this round-tripping across time zones.
pub fn iso_date_of(timestamp: Timestamp) -> String {
    iso_date(timestamp.date_naive())
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_iso_date(value: &str) -> Result<Day, CoreError> {
    Day::parse_from_str(value.trim(), ISO_DATE_FORMAT)
        .map_err(|e| CoreError::Validation(format!("Invalid ISO date '{value}': {e}")))
}

/// Today's date in UTC.
pub fn today_utc() -> Day {
    Utc::now().date_naive()
}

/// Toolbar label for a week, e.g. `"Oct 12 - Oct 18, 2026"`.
///
/// The year shown is the year of the last day of the week.
pub fn format_week_range(week_start: Day) -> String {
    let end = add_days(week_start, DAYS_PER_WEEK as i64 - 1);
    format!(
        "{} - {}, {}",
        week_start.format("%b %-d"),
        end.format("%b %-d"),
        end.format("%Y")
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
