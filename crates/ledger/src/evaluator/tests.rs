//! Tests for the badge evaluator.

use fixitup_core::{Failure, Project, UserProfile, STATUS_COMPLETED};

use super::*;
use crate::badges::{FLAWLESS_FINISH, TACKLED_THE_HARDEST};

fn project(id: i64, category: &str, difficulty: &str, failures: &[&str]) -> Project {
    Project {
        id,
        title: format!("Project {id}"),
        category: Some(category.to_string()),
        tags: vec![],
        difficulty: difficulty.to_string(),
        description: String::new(),
        failures: failures.iter().map(|f| Failure::from_label(*f)).collect(),
        points: 50,
        status: Some(STATUS_COMPLETED.to_string()),
        shared: false,
        date: None,
        username: None,
    }
}

fn profile(points: i64, completed: u32) -> UserProfile {
    UserProfile {
        points,
        completed_projects: completed,
        ..UserProfile::new("tester")
    }
}

#[test]
fn first_flawless_project() {
    let projects = vec![project(1, "Plumbing", "Easy", &[])];
    let eval = evaluate_badges(&projects, &profile(0, 0));
    assert_eq!(eval.newly_awarded, vec!["Novice Fixer", FLAWLESS_FINISH]);
    assert!(eval.badges.contains("Novice Fixer"));
    assert!(eval.badges.contains(FLAWLESS_FINISH));
}

#[test]
fn failures_block_flawless() {
    let projects = vec![project(1, "Plumbing", "Medium", &["Wrong part"])];
    let eval = evaluate_badges(&projects, &profile(40, 1));
    assert_eq!(eval.newly_awarded, vec!["Novice Fixer"]);
}

#[test]
fn only_latest_project_counts_for_quality_badges() {
    // Newest first: the flawless expert job is older.
    let projects = vec![
        project(2, "Roofing", "Easy", &["Dead battery"]),
        project(1, "Roofing", "Expert", &[]),
    ];
    let eval = evaluate_badges(&projects, &profile(0, 2));
    assert!(!eval.badges.contains(FLAWLESS_FINISH));
    assert!(!eval.badges.contains(TACKLED_THE_HARDEST));
}

#[test]
fn expert_latest_awards_hardest() {
    let projects = vec![project(1, "Electrical", "Expert", &["Called professional"])];
    let eval = evaluate_badges(&projects, &profile(180, 1));
    assert_eq!(eval.newly_awarded, vec!["Novice Fixer", "Century Club", TACKLED_THE_HARDEST]);
}

#[test]
fn point_thresholds_use_profile_points() {
    let eval = evaluate_badges(&[], &profile(1000, 0));
    assert_eq!(
        eval.newly_awarded,
        vec!["Century Club", "Handy Legend", "Master Builder"]
    );
    let below = evaluate_badges(&[], &profile(99, 0));
    assert!(below.newly_awarded.is_empty());
}

#[test]
fn count_uses_larger_of_counter_and_history() {
    let projects = vec![project(1, "Paint", "Easy", &["Forgot tool"])];
    let eval = evaluate_badges(&projects, &profile(0, 5));
    assert_eq!(eval.newly_awarded, vec!["Novice Fixer", "Home Hero"]);
}

#[test]
fn non_completed_status_is_not_counted() {
    let mut pending = project(1, "Paint", "Easy", &["Forgot tool"]);
    pending.status = Some("In Progress".to_string());
    let eval = evaluate_badges(&[pending], &profile(0, 0));
    assert!(!eval.badges.contains("Novice Fixer"));
}

#[test]
fn legacy_projects_without_status_count() {
    let mut legacy = project(1, "Paint", "Easy", &["Forgot tool"]);
    legacy.status = None;
    let eval = evaluate_badges(&[legacy.clone(), legacy], &profile(0, 0));
    assert!(eval.badges.contains("Novice Fixer"));
}

#[test]
fn category_mastery_awarded_once() {
    let projects: Vec<_> = (1..=5)
        .map(|i| project(i, "Electrical", "Medium", &["Dead battery"]))
        .collect();
    let first = evaluate_badges(&projects, &profile(250, 5));
    assert!(first.newly_awarded.contains(&"Electrical Master".to_string()));

    let again = evaluate_badges(&projects, &first.apply_to(&profile(250, 5)));
    assert!(again.newly_awarded.is_empty());
    assert_eq!(
        again.badges.iter().filter(|b| *b == "Electrical Master").count(),
        1
    );
}

#[test]
fn category_mastery_counts_tags() {
    let projects: Vec<_> = (1..=5)
        .map(|i| {
            let mut p = project(i, &format!("Misc {i}"), "Easy", &["Forgot tool"]);
            p.tags = vec!["Outdoors".to_string()];
            p
        })
        .collect();
    let eval = evaluate_badges(&projects, &profile(0, 5));
    assert!(eval.badges.contains("Outdoors Master"));
    assert!(!eval.badges.contains("Misc 1 Master"));
}

#[test]
fn four_in_a_category_is_not_mastery() {
    let projects: Vec<_> = (1..=4)
        .map(|i| project(i, "Tile", "Hard", &[]))
        .collect();
    let eval = evaluate_badges(&projects, &profile(400, 4));
    assert!(!eval.badges.contains("Tile Master"));
}

#[test]
fn existing_badges_keep_their_order_and_survive() {
    let mut prior = profile(0, 0);
    prior.badges.insert("Legacy Badge".to_string());
    prior.badges.insert("Novice Fixer".to_string());

    let eval = evaluate_badges(&[], &prior);
    assert!(eval.newly_awarded.is_empty());
    let names: Vec<_> = eval.badges.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Legacy Badge", "Novice Fixer"]);
}

#[test]
fn new_badges_are_appended_after_existing() {
    let mut prior = profile(120, 1);
    prior.badges.insert("Novice Fixer".to_string());
    let projects = vec![project(1, "Paint", "Easy", &[])];

    let eval = evaluate_badges(&projects, &prior);
    let names: Vec<_> = eval.badges.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Novice Fixer", "Century Club", FLAWLESS_FINISH]);
    assert_eq!(eval.newly_awarded, vec!["Century Club", FLAWLESS_FINISH]);
}
