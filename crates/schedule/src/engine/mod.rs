//! Due-date engine.
//!
//! [`next_due`] maps a recurrence policy and the current instant to the next
//! due instant. It is pure and total: every input yields a date, and
//! unresolvable policies fall back to 30 days from now.
//!
//! Date-only comparisons ("today") use the calendar of the time zone carried
//! by `now`, so callers choose the user's local calendar by converting the
//! instant before calling in.

mod calendar;
mod whimsy;


use chrono::{DateTime, Datelike, TimeZone};
use tracing::debug;

use crate::policy::{RecurrencePolicy, WhimsyKind};

pub use self::whimsy::{LUNAR_CYCLE_MS, REFERENCE_FULL_MOON_MS};

use self::calendar::{add_days, annual_date, start_of_day};
use self::whimsy::{next_friday_13th, next_full_moon, next_leap_day};

/// Interval used when a task has no usable recurrence.
pub const DEFAULT_INTERVAL_DAYS: i64 = 30;

/// Compute the next due instant for `policy` as seen from `now`.
///
/// - `Interval`: `now + value * unit` days. Always measured from `now`, so a
///   late completion resets the clock instead of catching up.
/// - `Annual`: midnight of this year's date, or next year's if this year's
///   date is already before today.
/// - `Whimsical`: the next full moon, Friday the 13th or February 29th.
/// - `None`: `now + 30` days.
pub fn next_due<Tz: TimeZone>(policy: Option<&RecurrencePolicy>, now: &DateTime<Tz>) -> DateTime<Tz> {
    let due = match policy {
        Some(p @ RecurrencePolicy::Interval { .. }) => {
            add_days(now, p.interval_days().unwrap_or(DEFAULT_INTERVAL_DAYS))
        }
        Some(RecurrencePolicy::Annual { month, day }) => {
            let today = now.date_naive();
            let date = match annual_date(today.year(), *month, *day) {
                Some(date) if date >= today => Some(date),
                _ => annual_date(today.year() + 1, *month, *day),
            };
            match date {
                Some(date) => start_of_day(&now.timezone(), date),
                None => add_days(now, DEFAULT_INTERVAL_DAYS),
            }
        }
        Some(RecurrencePolicy::Whimsical(WhimsyKind::FullMoon)) => next_full_moon(now),
        Some(RecurrencePolicy::Whimsical(WhimsyKind::Friday13th)) => next_friday_13th(now),
        Some(RecurrencePolicy::Whimsical(WhimsyKind::LeapDay)) => next_leap_day(now),
        None => add_days(now, DEFAULT_INTERVAL_DAYS),
    };

    debug!(
        policy = ?policy,
        now = %now.naive_local(),
        due = %due.naive_local(),
        "computed next due date"
    );
    due
}
