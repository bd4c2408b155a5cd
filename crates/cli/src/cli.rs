use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use fixitup_schedule::{IntervalUnit, RecurrencePolicy, WhimsyKind};

/// Home maintenance tracker with a DIY project ledger.
///
/// Tracks recurring chores (intervals, yearly dates, full moons and other
/// oddities) and awards points and badges for finished projects.
#[derive(Parser, Debug)]
#[command(name = "fixitup", version, about)]
pub struct CliArgs {
    /// Directory holding the JSON records (overrides FIXITUP_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List maintenance tasks, soonest due first.
    Tasks,

    /// Add a recurring maintenance task.
    AddTask(AddTaskArgs),

    /// Mark a task done and reschedule it.
    Complete {
        /// Task id as shown by `tasks`.
        id: i64,
    },

    /// Log a finished DIY project.
    LogProject(LogProjectArgs),

    /// Share a logged project to the community feed.
    Share {
        /// Project id as shown by `profile`.
        id: i64,

        /// Post it as an epic fail instead of a win.
        #[arg(long)]
        fail: bool,
    },

    /// Like a post in the community feed.
    Like {
        /// Post id as shown by `feed`.
        id: i64,
    },

    /// Show points, level, badges and recent projects.
    Profile,

    /// Show the leaderboard.
    Leaderboard,

    /// Show the community feed.
    Feed,
}

#[derive(Args, Debug)]
pub struct AddTaskArgs {
    /// Task title, e.g. "Clean gutters".
    pub title: String,

    /// Repeat every N units (see --unit).
    #[arg(long, conflicts_with_all = ["annual", "whimsy"])]
    pub every: Option<u32>,

    /// Unit for --every: days, weeks, months or years.
    #[arg(long, default_value = "days", value_parser = parse_unit)]
    pub unit: IntervalUnit,

    /// Repeat yearly on a calendar date, given as MM-DD.
    #[arg(long, value_parser = parse_month_day, conflicts_with = "whimsy")]
    pub annual: Option<(u32, u32)>,

    /// Whimsical schedule: full_moon, friday_13th or leap_day.
    #[arg(long, value_parser = parse_whimsy)]
    pub whimsy: Option<WhimsyKind>,

    /// Points awarded on completion.
    #[arg(long, default_value_t = 50)]
    pub points: i64,

    /// Tag for the task (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl AddTaskArgs {
    /// The recurrence selected by the flags; defaults to every 30 days.
    pub fn policy(&self) -> RecurrencePolicy {
        if let Some(kind) = self.whimsy {
            return RecurrencePolicy::Whimsical(kind);
        }
        if let Some((month, day)) = self.annual {
            return RecurrencePolicy::Annual { month, day };
        }
        RecurrencePolicy::Interval {
            unit: self.unit,
            value: self.every.unwrap_or(30),
        }
    }
}

#[derive(Args, Debug)]
pub struct LogProjectArgs {
    /// Project title.
    pub title: String,

    /// Primary category, e.g. Plumbing.
    #[arg(long)]
    pub category: Option<String>,

    /// Extra category tag (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Easy, Medium, Hard or Expert.
    #[arg(long, default_value = "Medium")]
    pub difficulty: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Something that went wrong, e.g. "Forgot tool" (repeatable).
    #[arg(long = "failure")]
    pub failures: Vec<String>,
}

fn parse_unit(s: &str) -> Result<IntervalUnit, String> {
    s.to_lowercase().parse()
}

fn parse_whimsy(s: &str) -> Result<WhimsyKind, String> {
    s.to_lowercase().replace('-', "_").parse()
}

/// `MM-DD` with a 1-based month, returned as (0-based month, day).
fn parse_month_day(s: &str) -> Result<(u32, u32), String> {
    let (month, day) = s
        .split_once('-')
        .ok_or_else(|| format!("expected MM-DD, got '{}'", s))?;
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| format!("invalid month: '{}'", month))?;
    let day: u32 = day
        .trim()
        .parse()
        .map_err(|_| format!("invalid day: '{}'", day))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month must be 1-12, got {}", month));
    }
    if !(1..=31).contains(&day) {
        return Err(format!("day must be 1-31, got {}", day));
    }
    Ok((month - 1, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_day_is_zero_based_month() {
        assert_eq!(parse_month_day("10-01"), Ok((9, 1)));
        assert_eq!(parse_month_day("2-29"), Ok((1, 29)));
        assert!(parse_month_day("13-01").is_err());
        assert!(parse_month_day("1001").is_err());
    }

    #[test]
    fn add_task_flags_select_policy() {
        let args = CliArgs::parse_from(["fixitup", "add-task", "Gutters", "--every", "2", "--unit", "weeks"]);
        let Command::AddTask(add) = args.command else {
            panic!("expected add-task");
        };
        assert_eq!(
            add.policy(),
            RecurrencePolicy::Interval {
                unit: IntervalUnit::Weeks,
                value: 2
            }
        );

        let args = CliArgs::parse_from(["fixitup", "add-task", "Howl", "--whimsy", "full-moon"]);
        let Command::AddTask(add) = args.command else {
            panic!("expected add-task");
        };
        assert_eq!(add.policy(), RecurrencePolicy::Whimsical(WhimsyKind::FullMoon));
    }

    #[test]
    fn conflicting_schedules_are_rejected() {
        let res = CliArgs::try_parse_from([
            "fixitup", "add-task", "X", "--every", "3", "--whimsy", "leap_day",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn share_fail_flag() {
        let args = CliArgs::parse_from(["fixitup", "share", "42", "--fail"]);
        assert!(matches!(args.command, Command::Share { id: 42, fail: true }));
    }
}
