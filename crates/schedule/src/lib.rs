//! Recurring maintenance task scheduling.
//!
//! This crate provides:
//! - Typed recurrence policies resolved from persisted task fields
//! - The due-date engine (interval, annual and whimsical recurrences)
//! - Due-status classification for task lists
//! - A clock-driven [`TaskScheduler`] for creating and completing tasks

pub mod engine;
pub mod policy;
pub mod status;
pub mod tasks;

pub use engine::{next_due, DEFAULT_INTERVAL_DAYS, LUNAR_CYCLE_MS, REFERENCE_FULL_MOON_MS};
pub use policy::{IntervalUnit, RecurrencePolicy, WhimsyKind};
pub use status::{days_until, due_status, sort_by_due, DueStatus};
pub use tasks::{default_tasks, TaskScheduler};
