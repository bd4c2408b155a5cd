//! Calendar helpers shared by the annual and whimsical recurrences.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone};

use super::DEFAULT_INTERVAL_DAYS;

/// Gregorian leap year: divisible by 4, and not by 100 unless also by 400.
pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The date for a 0-based `month` and `day` in `year`.
///
/// Built as the first of the month plus `day - 1` days, so a day past the
/// month's end rolls into the next month (Feb 29 in a common year is Mar 1,
/// Apr 31 is May 1).
pub(crate) fn annual_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)?;
    let offset = TimeDelta::try_days(i64::from(day) - 1)?;
    first.checked_add_signed(offset)
}

/// Local midnight of `date` in `tz`.
///
/// If midnight does not exist locally (a DST gap), the date's midnight is
/// interpreted as UTC instead.
pub(crate) fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// `now` plus a whole number of 24-hour days.
///
/// A result outside chrono's representable range falls back to the default
/// interval, and only to `now` itself if even that overflows.
pub(crate) fn add_days<Tz: TimeZone>(now: &DateTime<Tz>, days: i64) -> DateTime<Tz> {
    let shifted = |days: i64| {
        TimeDelta::try_days(days).and_then(|delta| now.clone().checked_add_signed(delta))
    };
    shifted(days)
        .or_else(|| shifted(DEFAULT_INTERVAL_DAYS))
        .unwrap_or_else(|| now.clone())
}

/// The month after a 1-based `(year, month)`.
pub(crate) fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
