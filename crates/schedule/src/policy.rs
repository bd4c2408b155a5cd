//! Typed recurrence policies.
//!
//! Tasks persist their recurrence as loose optional fields
//! ([`RecurrenceFields`]). [`RecurrencePolicy::from_fields`] resolves those
//! fields into one of three policies, or `None` when the record is malformed
//! or names an unknown variant; the engine then falls back to its 30-day
//! default.

use std::fmt;
use std::str::FromStr;

use fixitup_core::RecurrenceFields;

use crate::engine::DEFAULT_INTERVAL_DAYS;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ── Interval unit ────────────────────────────────────────────

/// Unit of a fixed-length interval. Months and years are approximations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    Days,
    Weeks,
    /// 30 days.
    Months,
    /// 365 days.
    Years,
}

impl IntervalUnit {
    pub fn days_factor(self) -> i64 {
        match self {
            IntervalUnit::Days => 1,
            IntervalUnit::Weeks => 7,
            IntervalUnit::Months => 30,
            IntervalUnit::Years => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntervalUnit::Days => "days",
            IntervalUnit::Weeks => "weeks",
            IntervalUnit::Months => "months",
            IntervalUnit::Years => "years",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "days" | "day" => Ok(IntervalUnit::Days),
            "weeks" | "week" => Ok(IntervalUnit::Weeks),
            "months" | "month" => Ok(IntervalUnit::Months),
            "years" | "year" => Ok(IntervalUnit::Years),
            other => Err(format!("unknown interval unit: '{}'", other)),
        }
    }
}

// ── Whimsical variants ───────────────────────────────────────

/// Recurrences found by calendar or lunar search rather than arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhimsyKind {
    FullMoon,
    Friday13th,
    LeapDay,
}

impl WhimsyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WhimsyKind::FullMoon => "full_moon",
            WhimsyKind::Friday13th => "friday_13th",
            WhimsyKind::LeapDay => "leap_day",
        }
    }
}

impl fmt::Display for WhimsyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WhimsyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full_moon" => Ok(WhimsyKind::FullMoon),
            "friday_13th" => Ok(WhimsyKind::Friday13th),
            "leap_day" => Ok(WhimsyKind::LeapDay),
            other => Err(format!("unknown whimsy type: '{}'", other)),
        }
    }
}

// ── Policy ───────────────────────────────────────────────────

/// How a task's next due date is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrencePolicy {
    /// `value` units after the moment of computation.
    Interval { unit: IntervalUnit, value: u32 },
    /// Every year on `day` of `month` (0-based, 0 = January).
    Annual { month: u32, day: u32 },
    Whimsical(WhimsyKind),
}

impl RecurrencePolicy {
    pub const FREQUENCY_INTERVAL: &'static str = "interval";
    pub const FREQUENCY_ANNUAL: &'static str = "annual";
    pub const FREQUENCY_WHIMSY: &'static str = "whimsy";

    /// Resolve persisted fields into a policy.
    ///
    /// - Interval records without a usable unit/value pair use the legacy
    ///   `frequency_days` count, or 30 days when that is missing too.
    /// - Annual records need a month in `0..=11` and a day; a day past
    ///   the month's end rolls into the next month when the date is computed.
    /// - Anything else (no type, unknown type, unknown whimsy) is `None`.
    pub fn from_fields(fields: &RecurrenceFields) -> Option<Self> {
        match fields.frequency_type.as_deref()?.trim() {
            Self::FREQUENCY_INTERVAL => {
                let unit = fields
                    .interval_unit
                    .as_deref()
                    .and_then(|u| u.parse::<IntervalUnit>().ok());
                let value = fields
                    .interval_value
                    .filter(|v| *v >= 1)
                    .and_then(|v| u32::try_from(v).ok());
                match (unit, value) {
                    (Some(unit), Some(value)) => Some(RecurrencePolicy::Interval { unit, value }),
                    _ => {
                        let days = fields
                            .frequency_days
                            .filter(|d| *d >= 1)
                            .and_then(|d| u32::try_from(d).ok())
                            .unwrap_or(DEFAULT_INTERVAL_DAYS as u32);
                        Some(RecurrencePolicy::Interval {
                            unit: IntervalUnit::Days,
                            value: days,
                        })
                    }
                }
            }
            Self::FREQUENCY_ANNUAL => {
                let month = fields.month.filter(|m| (0..=11).contains(m))?;
                let day = fields.day?;
                Some(RecurrencePolicy::Annual {
                    month: month as u32,
                    day: day.clamp(1, 31) as u32,
                })
            }
            Self::FREQUENCY_WHIMSY => fields
                .whimsy_type
                .as_deref()
                .and_then(|w| w.parse().ok())
                .map(RecurrencePolicy::Whimsical),
            _ => None,
        }
    }

    /// Persisted form of this policy. Interval policies also record the
    /// total day count in `frequency_days` for readers that only know it.
    pub fn to_fields(&self) -> RecurrenceFields {
        match *self {
            RecurrencePolicy::Interval { unit, value } => RecurrenceFields {
                frequency_type: Some(Self::FREQUENCY_INTERVAL.to_string()),
                interval_unit: Some(unit.as_str().to_string()),
                interval_value: Some(i64::from(value)),
                frequency_days: Some(self.interval_days().unwrap_or(DEFAULT_INTERVAL_DAYS)),
                ..Default::default()
            },
            RecurrencePolicy::Annual { month, day } => RecurrenceFields {
                frequency_type: Some(Self::FREQUENCY_ANNUAL.to_string()),
                month: Some(i64::from(month)),
                day: Some(i64::from(day)),
                ..Default::default()
            },
            RecurrencePolicy::Whimsical(kind) => RecurrenceFields {
                frequency_type: Some(Self::FREQUENCY_WHIMSY.to_string()),
                whimsy_type: Some(kind.as_str().to_string()),
                ..Default::default()
            },
        }
    }

    /// Length of an interval policy in days.
    pub fn interval_days(&self) -> Option<i64> {
        match *self {
            RecurrencePolicy::Interval { unit, value } => {
                Some(i64::from(value).saturating_mul(unit.days_factor()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for RecurrencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrencePolicy::Interval { unit, value: 1 } => {
                write!(f, "every {}", unit.as_str().trim_end_matches('s'))
            }
            RecurrencePolicy::Interval { unit, value } => write!(f, "every {value} {unit}"),
            RecurrencePolicy::Annual { month, day } => {
                let name = MONTH_NAMES.get(*month as usize).copied().unwrap_or("?");
                write!(f, "annually on {name} {day}")
            }
            RecurrencePolicy::Whimsical(WhimsyKind::FullMoon) => write!(f, "every full moon"),
            RecurrencePolicy::Whimsical(WhimsyKind::Friday13th) => write!(f, "every Friday the 13th"),
            RecurrencePolicy::Whimsical(WhimsyKind::LeapDay) => write!(f, "every leap day"),
        }
    }
}
