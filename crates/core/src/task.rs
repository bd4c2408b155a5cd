//! Maintenance task records.
//!
//! Recurrence is persisted as a flat set of optional fields so that records
//! written by older clients (which only carried `frequencyDays`) still load.
//! The scheduling crate resolves these fields into a typed policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// Persisted recurrence fields of a maintenance task.
///
/// Which fields are meaningful depends on `frequency_type`:
/// - `interval`: `interval_unit` + `interval_value`, or legacy `frequency_days`
/// - `annual`: `month` (0-11) + `day` (1-31)
/// - `whimsy`: `whimsy_type`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_value: Option<i64>,
    /// Legacy flat day count; also written alongside unit/value for old readers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whimsy_type: Option<String>,
}

/// A recurring household chore.
///
/// `next_due` is always derived from the recurrence and the instant it was
/// last computed (creation or completion); it is never edited by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: TaskId,
    pub title: String,
    #[serde(flatten)]
    pub recurrence: RecurrenceFields,
    #[serde(default)]
    pub last_completed: Option<DateTime<Utc>>,
    pub next_due: DateTime<Utc>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}
