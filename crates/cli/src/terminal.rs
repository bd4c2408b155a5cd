use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

use fixitup_core::{CommunityPost, LeaderboardEntry, MaintenanceTask, PostKind, Project, UserProfile};
use fixitup_ledger::ProjectLogged;
use fixitup_schedule::DueStatus;

use crate::app::{TaskCompleted, TaskRow};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const DIM: Color = Color::DarkGrey;
    const OVERDUE: Color = Color::Red;
    const DUE_SOON: Color = Color::Yellow;
    const GOOD: Color = Color::Green;
    const POINTS: Color = Color::Cyan;
    const BADGE: Color = Color::Yellow;
    const ERROR: Color = Color::Red;
}

fn status_color(status: DueStatus) -> Color {
    match status {
        DueStatus::Overdue => Colors::OVERDUE,
        DueStatus::DueSoon => Colors::DUE_SOON,
        DueStatus::Good => Colors::GOOD,
    }
}

/// Calendar date of `at` in the user's local calendar.
fn local_date(at: DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset).format("%Y-%m-%d").to_string()
}

fn project_header() -> String {
    format!("{:<15} {:<32} {:<10} {:>6}  {}", "ID", "PROJECT", "DIFFICULTY", "PTS", "SHARED")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

/// Renders command results to stdout. Dates are shown in the configured
/// local calendar.
pub struct Terminal {
    offset: FixedOffset,
}

impl Terminal {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    fn short_date(&self, at: DateTime<Utc>) -> String {
        local_date(at, &self.offset)
    }

    fn header(&self, title: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print(format!("{}\n", title)),
            ResetColor,
        )?;
        Ok(())
    }

    fn badges(&self, badges: &[String]) -> Result<()> {
        let mut stdout = io::stdout();
        for badge in badges {
            execute!(
                stdout,
                SetForegroundColor(Colors::BADGE),
                Print(format!("  * New badge: {}\n", badge)),
                ResetColor,
            )?;
        }
        Ok(())
    }

    /// Print the task table.
    pub fn print_tasks(&self, rows: &[TaskRow]) -> Result<()> {
        let mut stdout = io::stdout();
        self.header("Maintenance Tasks:")?;
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!(
                "{:<15} {:<32} {:<22} {:<11} {:<10} {:>6}\n",
                "ID", "TITLE", "SCHEDULE", "DUE", "STATUS", "PTS"
            )),
            Print(format!("{}\n", "-".repeat(101))),
            ResetColor,
        )?;

        for row in rows {
            let schedule = row
                .policy
                .map(|p| p.to_string())
                .unwrap_or_else(|| "every 30 days".to_string());
            let due = match row.days_until {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                d if d < 0 => format!("{}d late", -d),
                d => format!("in {}d", d),
            };
            execute!(
                stdout,
                Print(format!(
                    "{:<15} {:<32} {:<22} {:<11} ",
                    row.task.id,
                    truncate(&row.task.title, 32),
                    truncate(&schedule, 22),
                    due,
                )),
                SetForegroundColor(status_color(row.status)),
                Print(format!("{:<10}", row.status.to_string())),
                ResetColor,
                Print(format!(" {:>6}\n", row.task.points)),
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_task_added(&self, task: &MaintenanceTask) -> Result<()> {
        self.print_info(&format!(
            "Added task {} \"{}\", first due {}",
            task.id,
            task.title,
            self.short_date(task.next_due)
        ))
    }

    pub fn print_task_completed(&self, done: &TaskCompleted) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            Print(format!("Completed \"{}\". ", done.task.title)),
            SetForegroundColor(Colors::POINTS),
            Print(format!("+{} pts", done.task.points)),
            ResetColor,
            Print(format!(
                " (total {}, level {}). Next due {}.\n",
                done.profile.points,
                done.profile.level,
                self.short_date(done.task.next_due)
            )),
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_project_logged(&self, logged: &ProjectLogged) -> Result<()> {
        let mut stdout = io::stdout();
        if let Some(project) = logged.projects.first() {
            execute!(
                stdout,
                Print(format!("Logged \"{}\" ({}). ", project.title, project.difficulty)),
                SetForegroundColor(Colors::POINTS),
                Print(format!("{:+} pts", project.points)),
                ResetColor,
                Print(format!(
                    " (total {}, level {})\n",
                    logged.profile.points, logged.profile.level
                )),
            )?;
            for failure in &project.failures {
                execute!(
                    stdout,
                    SetForegroundColor(Colors::DIM),
                    Print(format!("  {} ({})\n", failure.label, failure.penalty)),
                    ResetColor,
                )?;
            }
        }
        self.badges(&logged.newly_awarded)?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_profile(&self, profile: &UserProfile, projects: &[Project]) -> Result<()> {
        let mut stdout = io::stdout();
        self.header(&profile.username)?;
        execute!(
            stdout,
            Print(format!(
                "Level {}  |  {} pts  |  {} projects completed\n",
                profile.level, profile.points, profile.completed_projects
            )),
        )?;
        if profile.badges.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print("No badges yet.\n"),
                ResetColor,
            )?;
        } else {
            let badges: Vec<&str> = profile.badges.iter().map(String::as_str).collect();
            execute!(
                stdout,
                SetForegroundColor(Colors::BADGE),
                Print(format!("Badges: {}\n", badges.join(", "))),
                ResetColor,
            )?;
        }

        if !projects.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!("\n{}\n", project_header())),
                ResetColor,
            )?;
            for project in projects.iter().take(10) {
                execute!(
                    stdout,
                    Print(format!(
                        "{:<15} {:<32} {:<10} {:>6}  {}\n",
                        project.id,
                        truncate(&project.title, 32),
                        project.difficulty,
                        project.points,
                        if project.shared { "yes" } else { "" },
                    )),
                )?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_leaderboard(
        &self,
        board: &[LeaderboardEntry],
        me: &UserProfile,
        rank: Option<usize>,
    ) -> Result<()> {
        let mut stdout = io::stdout();
        self.header("Leaderboard:")?;
        for (i, entry) in board.iter().enumerate() {
            let marker = if entry.username == me.username { ">" } else { " " };
            execute!(
                stdout,
                Print(format!(
                    "{} {:>3}. {:<24} {:>7} pts  level {}\n",
                    marker,
                    i + 1,
                    truncate(&entry.username, 24),
                    entry.points,
                    entry.level
                )),
            )?;
        }
        if let Some(rank) = rank {
            self.print_info(&format!("You are ranked #{} of {}.", rank, board.len()))?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_post(&self, post: &CommunityPost) -> Result<()> {
        let mut stdout = io::stdout();
        let (label, color) = match post.kind {
            PostKind::Win => ("WIN", Colors::GOOD),
            PostKind::Fail => ("FAIL", Colors::OVERDUE),
        };
        execute!(
            stdout,
            SetForegroundColor(color),
            Print(format!("[{:<4}] ", label)),
            ResetColor,
            Print(format!(
                "{} (lvl {}): \"{}\" {:+} pts",
                post.username, post.level, post.project.title, post.project.points
            )),
            SetForegroundColor(Colors::DIM),
            Print(format!(
                "  {} likes  #{}  {}\n",
                post.likes,
                post.id,
                self.short_date(post.date)
            )),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_feed(&self, posts: &[CommunityPost]) -> Result<()> {
        self.header("Community Feed:")?;
        if posts.is_empty() {
            return self.print_info("Nothing shared yet.");
        }
        for post in posts {
            self.print_post(post)?;
        }
        Ok(())
    }

    /// Print an error message.
    pub fn print_error(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::ERROR),
            Print(format!("Error: {}\n", msg)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print an info message.
    pub fn print_info(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("{}\n", msg)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_titles() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long project title", 10), "a very ...");
    }

    #[test]
    fn project_columns_name_difficulty() {
        let header = project_header();
        assert!(header.contains("DIFFICULTY"));
        assert!(!header.contains("LEVEL"));
        // Cells are padded to the same widths as the header.
        let row = format!("{:<15} {:<32} {:<10} {:>6}  {}", 1, "Shelf", "Expert", 200, "");
        assert_eq!(header.find("PTS").map(|i| i + 3), row.find("200").map(|i| i + 3));
    }

    #[test]
    fn dates_use_local_calendar() {
        use chrono::TimeZone;
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        // Local midnight Oct 1 at +09:00 is still Sep 30 in UTC.
        let due = tokyo
            .with_ymd_and_hms(2025, 10, 1, 0, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(local_date(due, &tokyo), "2025-10-01");
        assert_eq!(local_date(due, &FixedOffset::east_opt(0).unwrap()), "2025-09-30");
        assert_eq!(Terminal::new(tokyo).short_date(due), "2025-10-01");
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color(DueStatus::Overdue), Color::Red);
        assert_eq!(status_color(DueStatus::Good), Color::Green);
    }
}
