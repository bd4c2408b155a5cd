//! Load-time migrations for records written by older clients.

use fixitup_core::{level_for_points, Project, UserProfile, STATUS_COMPLETED};

/// Give every project without a status an explicit `"Completed"`.
///
/// Returns the number of records changed.
pub fn migrate_projects(projects: &mut [Project]) -> usize {
    let mut changed = 0;
    for project in projects.iter_mut().filter(|p| p.status.is_none()) {
        project.status = Some(STATUS_COMPLETED.to_string());
        changed += 1;
    }
    changed
}

/// Re-derive the stored level from points. Returns whether it changed.
pub fn migrate_profile(profile: &mut UserProfile) -> bool {
    let level = level_for_points(profile.points);
    if profile.level == level {
        return false;
    }
    profile.level = level;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(status: Option<&str>) -> Project {
        Project {
            id: 1,
            title: "Shelf".into(),
            category: None,
            tags: vec![],
            difficulty: "Easy".into(),
            description: String::new(),
            failures: vec![],
            points: 25,
            status: status.map(String::from),
            shared: false,
            date: None,
            username: None,
        }
    }

    #[test]
    fn fills_missing_status_only() {
        let mut projects = vec![project(None), project(Some("In Progress")), project(None)];
        assert_eq!(migrate_projects(&mut projects), 2);
        assert_eq!(projects[0].status.as_deref(), Some(STATUS_COMPLETED));
        assert_eq!(projects[1].status.as_deref(), Some("In Progress"));
        assert_eq!(migrate_projects(&mut projects), 0);
    }

    #[test]
    fn stale_level_is_recomputed() {
        let mut profile = UserProfile::new("u");
        profile.points = 340;
        assert!(migrate_profile(&mut profile));
        assert_eq!(profile.level, 4);
        assert!(!migrate_profile(&mut profile));
    }
}
