//! CLI binary for tickler.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tickler::agenda::{self, AgendaDay};
use tickler::reminder_form::{self, ReminderForm};
use tickler::{ListType, ReminderDispatcher, Task, TaskStore, TicklerConfig, Weekday, occurrence};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Tickler: recurring to-do lists with reminders.
#[derive(Parser)]
#[command(name = "tickler", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the task store (overrides the config file).
    #[arg(long)]
    tasks: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Add a task.
    Add {
        /// Task title.
        title: String,
        /// List type: standard, daily, weekly, monthly, yearly.
        #[arg(short, long, default_value = "standard")]
        list: ListType,
        /// Due date (YYYY-MM-DD).
        #[arg(short, long)]
        due: Option<NaiveDate>,
        /// Day of week for weekly lists.
        #[arg(short, long)]
        weekday: Option<Weekday>,
        /// Reminder, e.g. `daily@09:00`, `date:2025-07-04`, `week:mon@18:30`,
        /// `month:15`, `year:12-25`, `before:2@20:00`. May be repeated.
        #[arg(short, long = "remind")]
        reminders: Vec<String>,
        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// List all tasks.
    List,

    /// Show what is due, overdue and reminding on a day.
    Today {
        /// Day to show (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List reminders that will fire soon.
    Upcoming {
        /// Days to look ahead (defaults to the configured horizon).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(agenda::MAX_HORIZON_DAYS)))]
        days: Option<u32>,
    },

    /// Mark a task completed.
    Complete {
        /// Task ID or unique ID prefix.
        id: String,
        /// Reopen instead of completing.
        #[arg(long)]
        undo: bool,
    },

    /// Delete a task.
    Remove {
        /// Task ID or unique ID prefix.
        id: String,
    },

    /// Watch for due reminders and print them until Ctrl+C.
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tickler=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => TicklerConfig::from_file(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => {
            let default_path = TicklerConfig::default_config_path();
            if default_path.exists() {
                TicklerConfig::from_file(&default_path)?
            } else {
                TicklerConfig::default()
            }
        }
    };
    let store_path = cli
        .tasks
        .clone()
        .unwrap_or_else(|| config.store.resolved_path());

    match cli.command.unwrap_or(Command::Today { date: None }) {
        Command::Add {
            title,
            list,
            due,
            weekday,
            reminders,
            notes,
        } => add_task(&config, &store_path, title, list, due, weekday, &reminders, notes),
        Command::List => list_tasks(&store_path),
        Command::Today { date } => show_day(&store_path, date.unwrap_or_else(today)),
        Command::Upcoming { days } => {
            show_upcoming(&store_path, days.unwrap_or(config.reminders.horizon_days))
        }
        Command::Complete { id, undo } => complete_task(&store_path, &id, !undo),
        Command::Remove { id } => remove_task(&store_path, &id),
        Command::Watch => watch(&config, store_path).await,
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[allow(clippy::too_many_arguments)]
fn add_task(
    config: &TicklerConfig,
    store_path: &std::path::Path,
    title: String,
    list: ListType,
    due: Option<NaiveDate>,
    weekday: Option<Weekday>,
    reminder_args: &[String],
    notes: Option<String>,
) -> anyhow::Result<()> {
    let forms = reminder_args
        .iter()
        .map(|arg| {
            ReminderForm::parse_spec(arg, config.default_reminder_time())
                .with_context(|| format!("invalid reminder '{arg}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let reminders = reminder_form::reminders_from_forms(&forms)?;

    let mut task = Task::new(title, list);
    task.due_date = due;
    task.day_of_week = weekday;
    task.reminders = reminders;
    task.notes = notes;

    let mut store = TaskStore::open(store_path)?;
    let id = task.id.clone();
    store.upsert(task)?;
    store.save()?;
    println!("added {id}");
    Ok(())
}

fn list_tasks(store_path: &std::path::Path) -> anyhow::Result<()> {
    let store = TaskStore::open(store_path)?;
    if store.tasks().is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    let today = today();
    for task in store.tasks() {
        let status = if task.completed { "✓" } else { " " };
        let next = occurrence::next_occurrence(task, today)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "[{status}] {} {} ({}) next: {next}",
            short_id(&task.id),
            task.title,
            task.list_type
        );
        for reminder in &task.reminders {
            println!("      ⏰ {}", reminder_form::format_reminder(reminder));
        }
    }
    Ok(())
}

fn show_day(store_path: &std::path::Path, date: NaiveDate) -> anyhow::Result<()> {
    let store = TaskStore::open(store_path)?;
    let day = AgendaDay::build(store.tasks(), date);
    println!("{}", date.format("%A %Y-%m-%d"));
    if day.is_empty() {
        println!("  Nothing scheduled.");
        return Ok(());
    }
    for id in &day.due {
        if let Some(task) = store.get(id) {
            let status = if task.completed { "✓" } else { " " };
            println!("  [{status}] {}", task.title);
        }
    }
    for id in &day.overdue {
        if let Some(task) = store.get(id) {
            let due = task.due_date.map(|d| d.to_string()).unwrap_or_default();
            println!("  [!] {} (overdue since {due})", task.title);
        }
    }
    for reminder in &day.reminders {
        println!("  ⏰ {} {}", reminder.at.format("%H:%M"), reminder.title);
    }
    Ok(())
}

fn show_upcoming(store_path: &std::path::Path, days: u32) -> anyhow::Result<()> {
    let store = TaskStore::open(store_path)?;
    let now = chrono::Local::now().naive_local();
    let upcoming = agenda::upcoming_reminders(store.tasks(), now, days);
    if upcoming.is_empty() {
        println!("No reminders in the next {days} day(s).");
        return Ok(());
    }
    for reminder in upcoming {
        println!("{}  {}", reminder.at.format("%a %Y-%m-%d %H:%M"), reminder.title);
    }
    Ok(())
}

fn complete_task(store_path: &std::path::Path, prefix: &str, completed: bool) -> anyhow::Result<()> {
    let mut store = TaskStore::open(store_path)?;
    let id = store.resolve_prefix(prefix)?.id.clone();
    store.set_completed(&id, completed);
    store.save()?;
    println!("{} {}", if completed { "completed" } else { "reopened" }, id);
    Ok(())
}

fn remove_task(store_path: &std::path::Path, prefix: &str) -> anyhow::Result<()> {
    let mut store = TaskStore::open(store_path)?;
    let id = store.resolve_prefix(prefix)?.id.clone();
    if let Some(task) = store.remove(&id) {
        store.save()?;
        println!("removed {} ({})", id, task.title);
    }
    Ok(())
}

async fn watch(config: &TicklerConfig, store_path: PathBuf) -> anyhow::Result<()> {
    println!("Tickler v{} - watching reminders", env!("CARGO_PKG_VERSION"));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let source_path = store_path.clone();
    let dispatcher = ReminderDispatcher::new(
        Box::new(move || Ok(TaskStore::open(&source_path)?.tasks().to_vec())),
        tx,
    )
    .with_config(&config.dispatcher);
    let handle = dispatcher.run();

    println!("Reading {}. Press Ctrl+C to stop.\n", store_path.display());

    loop {
        tokio::select! {
            reminder = rx.recv() => match reminder {
                Some(r) => println!("⏰ {}  {}", r.at.format("%H:%M"), r.title),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    handle.abort();
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
