//! Due-status classification for task lists.

use std::fmt;

use chrono::{DateTime, Utc};

use fixitup_core::MaintenanceTask;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Where a task stands relative to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueStatus {
    Overdue,
    DueSoon,
    Good,
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStatus::Overdue => write!(f, "Overdue"),
            DueStatus::DueSoon => write!(f, "Due Soon"),
            DueStatus::Good => write!(f, "Good"),
        }
    }
}

/// Whole days until `due`, rounded up. A task due later today is 1 day
/// away; one that fell due less than a day ago is 0.
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (due - now).num_milliseconds();
    ms.div_euclid(DAY_MS) + i64::from(ms.rem_euclid(DAY_MS) > 0)
}

/// Classify a task: negative days-until is overdue, up to `due_soon_days`
/// is due soon, anything further out is good.
pub fn due_status(task: &MaintenanceTask, now: DateTime<Utc>, due_soon_days: i64) -> DueStatus {
    let days = days_until(task.next_due, now);
    if days < 0 {
        DueStatus::Overdue
    } else if days <= due_soon_days {
        DueStatus::DueSoon
    } else {
        DueStatus::Good
    }
}

/// Sort tasks by ascending due date; ties keep their existing order.
pub fn sort_by_due(tasks: &mut [MaintenanceTask]) {
    tasks.sort_by_key(|t| t.next_due);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use fixitup_core::RecurrenceFields;

    fn task(id: i64, next_due: DateTime<Utc>) -> MaintenanceTask {
        MaintenanceTask {
            id,
            title: format!("task {id}"),
            recurrence: RecurrenceFields::default(),
            last_completed: None,
            next_due,
            points: 10,
            tags: vec![],
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn days_until_rounds_up() {
        let now = now();
        assert_eq!(days_until(now, now), 0);
        assert_eq!(days_until(now + TimeDelta::hours(1), now), 1);
        assert_eq!(days_until(now + TimeDelta::days(1), now), 1);
        assert_eq!(days_until(now - TimeDelta::hours(1), now), 0);
        assert_eq!(days_until(now - TimeDelta::hours(25), now), -1);
        assert_eq!(days_until(now - TimeDelta::days(10), now), -10);
    }

    #[test]
    fn classification_boundaries() {
        let now = now();
        assert_eq!(due_status(&task(1, now - TimeDelta::days(2)), now, 7), DueStatus::Overdue);
        assert_eq!(due_status(&task(2, now), now, 7), DueStatus::DueSoon);
        assert_eq!(due_status(&task(3, now + TimeDelta::days(7)), now, 7), DueStatus::DueSoon);
        assert_eq!(
            due_status(&task(4, now + TimeDelta::days(7) + TimeDelta::minutes(1)), now, 7),
            DueStatus::Good
        );
    }

    #[test]
    fn sort_is_ascending_and_stable() {
        let now = now();
        let mut tasks = vec![
            task(1, now + TimeDelta::days(5)),
            task(2, now - TimeDelta::days(1)),
            task(3, now + TimeDelta::days(5)),
            task(4, now),
        ];
        sort_by_due(&mut tasks);
        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }
}
