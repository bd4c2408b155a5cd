//! [`TaskScheduler`]: clock-driven creation and completion of maintenance tasks.

use chrono::{DateTime, FixedOffset, Offset, TimeDelta, TimeZone, Utc};
use tracing::debug;

use fixitup_core::{Clock, MaintenanceTask, RecurrenceFields, TaskId};

use crate::engine::next_due;
use crate::policy::RecurrencePolicy;
use crate::status::{due_status, DueStatus};

/// Applies the due-date engine to tasks using an injected clock.
///
/// "Today" is evaluated in the calendar given by `offset`, so annual and
/// whimsical dates land on local midnight.
pub struct TaskScheduler<C: Clock> {
    clock: C,
    offset: FixedOffset,
}

impl<C: Clock> TaskScheduler<C> {
    pub fn new(clock: C, offset: FixedOffset) -> Self {
        Self { clock, offset }
    }

    /// A scheduler whose local calendar is UTC.
    pub fn utc(clock: C) -> Self {
        Self::new(clock, Utc.fix())
    }

    /// Current instant in the scheduler's local calendar.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now().with_timezone(&self.offset)
    }

    /// Next due instant for a task, as of now.
    pub fn compute_next_due(&self, task: &MaintenanceTask) -> DateTime<Utc> {
        let policy = RecurrencePolicy::from_fields(&task.recurrence);
        next_due(policy.as_ref(), &self.now()).with_timezone(&Utc)
    }

    /// Create a task whose first due date is computed from now.
    pub fn create_task(
        &self,
        id: TaskId,
        title: impl Into<String>,
        policy: RecurrencePolicy,
        points: i64,
        tags: Vec<String>,
    ) -> MaintenanceTask {
        let next_due = next_due(Some(&policy), &self.now()).with_timezone(&Utc);
        let task = MaintenanceTask {
            id,
            title: title.into(),
            recurrence: policy.to_fields(),
            last_completed: None,
            next_due,
            points,
            tags,
        };
        debug!(task_id = %task.id, policy = %policy, next_due = %task.next_due, "created task");
        task
    }

    /// Mark a task completed now: stamps `last_completed` and reschedules.
    pub fn complete_task(&self, task: &MaintenanceTask) -> MaintenanceTask {
        let now = self.clock.now();
        let next_due = self.compute_next_due(task);
        debug!(
            task_id = %task.id,
            previous_due = %task.next_due,
            next_due = %next_due,
            "completed task"
        );
        MaintenanceTask {
            last_completed: Some(now),
            next_due,
            ..task.clone()
        }
    }

    /// Due status of a task as of now.
    pub fn status(&self, task: &MaintenanceTask, due_soon_days: i64) -> DueStatus {
        due_status(task, self.clock.now(), due_soon_days)
    }
}

/// Starter tasks for an empty store.
///
/// - HVAC filter every 90 days, ten days overdue
/// - Smoke alarm batteries every October 1st
/// - Pre-emergent fertilizer every 120 days, due now
pub fn default_tasks<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<MaintenanceTask> {
    let now_utc = now.with_timezone(&Utc);
    let legacy_interval = |days: i64| RecurrenceFields {
        frequency_type: Some(RecurrencePolicy::FREQUENCY_INTERVAL.to_string()),
        frequency_days: Some(days),
        ..Default::default()
    };
    let smoke_alarm = RecurrencePolicy::Annual { month: 9, day: 1 };
    let smoke_alarm_due = next_due(Some(&smoke_alarm), now).with_timezone(&Utc);

    vec![
        MaintenanceTask {
            id: 1,
            title: "Change HVAC Filter".to_string(),
            recurrence: legacy_interval(90),
            last_completed: Some(now_utc - TimeDelta::days(100)),
            next_due: now_utc - TimeDelta::days(10),
            points: 50,
            tags: vec!["HVAC".to_string(), "Maintenance".to_string()],
        },
        MaintenanceTask {
            id: 2,
            title: "Check Smoke Alarm Batteries".to_string(),
            recurrence: smoke_alarm.to_fields(),
            last_completed: None,
            next_due: smoke_alarm_due,
            points: 100,
            tags: vec!["Safety".to_string(), "Electrical".to_string()],
        },
        MaintenanceTask {
            id: 3,
            title: "Apply Pre-emergent Fertilizer".to_string(),
            recurrence: legacy_interval(120),
            last_completed: None,
            next_due: now_utc,
            points: 75,
            tags: vec!["Landscaping".to_string(), "Outdoors".to_string()],
        },
    ]
}
