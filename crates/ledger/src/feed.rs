//! Community feed: sharing projects and liking posts.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use fixitup_core::{
    CommunityPost, PostId, PostKind, Project, ProjectId, UserProfile, FEED_CAPACITY,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareError {
    #[error("project {0} has already been shared")]
    AlreadyShared(ProjectId),

    #[error("project {0} not found")]
    UnknownProject(ProjectId),
}

/// Feed and project history after a successful share.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedProject {
    pub posts: Vec<CommunityPost>,
    pub projects: Vec<Project>,
}

/// Post a project to the feed and mark it shared.
///
/// A project can be shared once. The new post goes to the front, and the
/// feed keeps at most [`FEED_CAPACITY`] posts. The post id is the share
/// instant in Unix milliseconds, bumped past any id already in the feed.
pub fn share_project(
    posts: &[CommunityPost],
    projects: &[Project],
    project_id: ProjectId,
    profile: &UserProfile,
    kind: PostKind,
    now: DateTime<Utc>,
) -> Result<SharedProject, ShareError> {
    let project = projects
        .iter()
        .find(|p| p.id == project_id)
        .ok_or(ShareError::UnknownProject(project_id))?;
    if project.shared {
        return Err(ShareError::AlreadyShared(project_id));
    }

    let mut shared = project.clone();
    shared.shared = true;

    let post = CommunityPost {
        id: next_post_id(posts, now),
        username: profile.username.clone(),
        points: profile.points,
        level: profile.level,
        project: shared,
        kind,
        likes: 0,
        comments: Vec::new(),
        date: now,
    };
    debug!(post_id = post.id, project_id, kind = ?kind, "shared project");

    let mut feed = Vec::with_capacity(posts.len() + 1);
    feed.push(post);
    feed.extend(posts.iter().take(FEED_CAPACITY - 1).cloned());

    let projects = projects
        .iter()
        .map(|p| {
            if p.id == project_id {
                Project {
                    shared: true,
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect();

    Ok(SharedProject {
        posts: feed,
        projects,
    })
}

fn next_post_id(posts: &[CommunityPost], now: DateTime<Utc>) -> PostId {
    let candidate = now.timestamp_millis();
    match posts.iter().map(|p| p.id).max() {
        Some(max) if max >= candidate => max + 1,
        _ => candidate,
    }
}

/// Add one like to the post with `post_id`. Unknown ids leave the feed as is.
pub fn like_post(posts: &[CommunityPost], post_id: PostId) -> Vec<CommunityPost> {
    posts
        .iter()
        .map(|post| {
            if post.id == post_id {
                CommunityPost {
                    likes: post.likes.saturating_add(1),
                    ..post.clone()
                }
            } else {
                post.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 4, 15, 0, 0).unwrap()
    }

    fn project(id: ProjectId) -> Project {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Project {id}"),
            "difficulty": "Medium",
            "points": 50,
            "status": "Completed"
        }))
        .unwrap()
    }

    #[test]
    fn share_marks_project_and_prepends_post() {
        let profile = UserProfile::new("tester");
        let projects = vec![project(1), project(2)];
        let out = share_project(&[], &projects, 2, &profile, PostKind::Win, now()).unwrap();

        assert_eq!(out.posts.len(), 1);
        assert_eq!(out.posts[0].id, now().timestamp_millis());
        assert_eq!(out.posts[0].kind, PostKind::Win);
        assert!(out.posts[0].project.shared);
        assert!(out.projects[1].shared);
        assert!(!out.projects[0].shared);
    }

    #[test]
    fn share_is_set_once() {
        let profile = UserProfile::new("tester");
        let projects = vec![project(1)];
        let out = share_project(&[], &projects, 1, &profile, PostKind::Fail, now()).unwrap();
        let again = share_project(&out.posts, &out.projects, 1, &profile, PostKind::Win, now());
        assert_eq!(again, Err(ShareError::AlreadyShared(1)));
    }

    #[test]
    fn share_unknown_project() {
        let profile = UserProfile::new("tester");
        let err = share_project(&[], &[], 9, &profile, PostKind::Win, now()).unwrap_err();
        assert_eq!(err, ShareError::UnknownProject(9));
    }

    #[test]
    fn feed_is_capped() {
        let profile = UserProfile::new("tester");
        let mut posts = Vec::new();
        let mut projects: Vec<Project> = (0..60).map(project).collect();
        for i in 0..60 {
            let at = now() + TimeDelta::seconds(i);
            let out = share_project(&posts, &projects, i, &profile, PostKind::Win, at).unwrap();
            posts = out.posts;
            projects = out.projects;
        }
        assert_eq!(posts.len(), FEED_CAPACITY);
        assert_eq!(posts[0].project.id, 59);
        assert_eq!(posts.last().map(|p| p.project.id), Some(10));
    }

    #[test]
    fn shares_in_the_same_millisecond_get_distinct_ids() {
        let profile = UserProfile::new("tester");
        let projects = vec![project(1), project(2)];
        let first = share_project(&[], &projects, 1, &profile, PostKind::Win, now()).unwrap();
        let second =
            share_project(&first.posts, &first.projects, 2, &profile, PostKind::Win, now()).unwrap();

        let ids: Vec<PostId> = second.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![now().timestamp_millis() + 1, now().timestamp_millis()]);

        let liked = like_post(&second.posts, ids[0]);
        assert_eq!(liked[0].likes, 1);
        assert_eq!(liked[1].likes, 0);
    }

    #[test]
    fn like_increments_only_target() {
        let profile = UserProfile::new("tester");
        let projects = vec![project(1), project(2)];
        let first = share_project(&[], &projects, 1, &profile, PostKind::Win, now()).unwrap();
        let later = now() + TimeDelta::seconds(5);
        let second =
            share_project(&first.posts, &first.projects, 2, &profile, PostKind::Fail, later).unwrap();

        let liked = like_post(&second.posts, now().timestamp_millis());
        let liked = like_post(&liked, now().timestamp_millis());
        assert_eq!(liked[0].likes, 0);
        assert_eq!(liked[1].likes, 2);
        assert_eq!(like_post(&liked, 12345), liked);
    }
}
