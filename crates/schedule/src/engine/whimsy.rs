//! Whimsical recurrences: next full moon, Friday the 13th and leap day.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};

use super::calendar::{add_days, is_leap_year, next_month, start_of_day};
use super::DEFAULT_INTERVAL_DAYS;

/// A known full moon: 2025-01-13T22:27:00Z, in Unix milliseconds.
pub const REFERENCE_FULL_MOON_MS: i64 = 1_736_807_220_000;

/// Synodic month of 29.53059 days, in milliseconds.
pub const LUNAR_CYCLE_MS: i64 = 2_551_442_976;

/// Full moon `cycles` synodic months after the reference.
fn lunar_instant(cycles: i64) -> Option<DateTime<Utc>> {
    let offset = cycles.checked_mul(LUNAR_CYCLE_MS)?;
    Utc.timestamp_millis_opt(REFERENCE_FULL_MOON_MS.checked_add(offset)?)
        .single()
}

/// First full moon at or after `now`, stepping whole cycles from the
/// reference. Instants before the reference yield the reference itself.
pub(crate) fn next_full_moon<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let now_utc = now.with_timezone(&Utc);
    let elapsed = now_utc.timestamp_millis() - REFERENCE_FULL_MOON_MS;
    let cycles = if elapsed <= 0 {
        0
    } else {
        (elapsed + LUNAR_CYCLE_MS - 1) / LUNAR_CYCLE_MS
    };

    let Some(mut moon) = lunar_instant(cycles) else {
        return now.clone();
    };
    // `now` may carry a sub-millisecond remainder past a cycle boundary.
    if moon < now_utc {
        moon = match lunar_instant(cycles + 1) {
            Some(next) => next,
            None => return now.clone(),
        };
    }
    moon.with_timezone(&now.timezone())
}

/// Next Friday the 13th, keeping the time of day of `now`.
///
/// The search starts at this month's 13th unless that date has already
/// passed. If today is itself a Friday the 13th, `now` is returned.
pub(crate) fn next_friday_13th<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let today = now.date_naive();
    let (mut year, mut month) = (today.year(), today.month());
    if today.day() > 13 {
        (year, month) = next_month(year, month);
    }

    // Every calendar year has at least one Friday the 13th, and no gap
    // between two of them exceeds 14 months.
    for _ in 0..=14 {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 13) {
            if date.weekday() == Weekday::Fri {
                if date == today {
                    return now.clone();
                }
                let tz = now.timezone();
                return tz
                    .from_local_datetime(&date.and_time(now.time()))
                    .earliest()
                    .unwrap_or_else(|| start_of_day(&tz, date));
            }
        }
        (year, month) = next_month(year, month);
    }
    add_days(now, DEFAULT_INTERVAL_DAYS)
}

/// Midnight of the next February 29th on or after today.
pub(crate) fn next_leap_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let today = now.date_naive();
    // Leap years are at most 8 years apart (e.g. 2096 -> 2104).
    for year in today.year()..=today.year() + 8 {
        if !is_leap_year(year) {
            continue;
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, 2, 29) {
            if date >= today {
                return start_of_day(&now.timezone(), date);
            }
        }
    }
    add_days(now, DEFAULT_INTERVAL_DAYS)
}
