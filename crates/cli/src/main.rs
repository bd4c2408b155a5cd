mod app;
mod cli;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;

use fixitup_core::{config, Config, Failure, PostKind, SystemClock};
use fixitup_ledger::ProjectDraft;
use fixitup_schedule::TaskScheduler;

use crate::app::App;
use crate::cli::{CliArgs, Command};
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    config::load_dotenv();
    let args = CliArgs::parse();

    let mut config = Config::from_env();
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = dir;
    }
    config.log_summary();

    let offset = config.schedule.utc_offset()?;
    let gateway = fixitup_storage::open_from_config(&config)
        .await
        .with_context(|| format!("failed to open data dir {}", config.storage.data_dir.display()))?;
    let app = App::new(
        gateway,
        TaskScheduler::new(SystemClock, offset),
        config.schedule.due_soon_days,
        config.user.username.clone(),
    );
    let terminal = Terminal::new(offset);

    match args.command {
        Command::Tasks => {
            let rows = app.tasks().await?;
            terminal.print_tasks(&rows)?;
        }
        Command::AddTask(add) => {
            let task = app
                .add_task(&add.title, add.policy(), add.points, add.tags.clone())
                .await?;
            terminal.print_task_added(&task)?;
        }
        Command::Complete { id } => {
            let done = app.complete_task(id).await?;
            terminal.print_task_completed(&done)?;
        }
        Command::LogProject(log) => {
            let draft = ProjectDraft {
                title: log.title,
                category: log.category,
                tags: log.tags,
                difficulty: log.difficulty,
                description: log.description,
                failures: log.failures.into_iter().map(Failure::from_label).collect(),
            };
            let logged = app.log_project(draft).await?;
            terminal.print_project_logged(&logged)?;
        }
        Command::Share { id, fail } => {
            let kind = if fail { PostKind::Fail } else { PostKind::Win };
            let post = app.share(id, kind).await?;
            terminal.print_post(&post)?;
        }
        Command::Like { id } => match app.like(id).await? {
            Some(likes) => terminal.print_info(&format!("Post #{} now has {} likes.", id, likes))?,
            None => terminal.print_error(&format!("no post with id {}", id))?,
        },
        Command::Profile => {
            let profile = app.profile().await?;
            let projects = app.projects().await?;
            terminal.print_profile(&profile, &projects)?;
        }
        Command::Leaderboard => {
            let (board, me, rank) = app.leaderboard().await?;
            terminal.print_leaderboard(&board, &me, rank)?;
        }
        Command::Feed => {
            let posts = app.feed().await?;
            terminal.print_feed(&posts)?;
        }
    }

    Ok(())
}
