//! `slots` CLI — suggest free time slots and manage the task file they are
//! computed from.
//!
//! ## Usage
//!
//! ```sh
//! # Suggest 60 minute slots for alice on 2026-03-16 with a 10 minute buffer
//! slots suggest --tasks tasks.json --user alice --date 2026-03-16 --duration 60 --buffer 10
//!
//! # Use a policy file, overriding the end of the working day
//! slots suggest --tasks tasks.json --user alice --date 2026-03-16 --duration 30 \
//!     --config policy.toml --work-end 18:00
//!
//! # Print one timestamp per line instead of JSON
//! slots suggest --tasks tasks.json --user alice --date 2026-03-16 --duration 30 --format text
//!
//! # Merge raw intervals (stdin → stdout)
//! echo '[{"start":"2026-03-16T10:00:00Z","end":"2026-03-16T11:00:00Z"}]' | slots normalize --buffer 15
//!
//! # Maintain the task file
//! slots task add --tasks tasks.json --user alice --name standup \
//!     --start 2026-03-16T10:00:00Z --end 2026-03-16T10:15:00Z
//! slots task remove --tasks tasks.json --user alice --name standup
//! ```

mod config;
mod logging;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use slot_engine::{Scheduler, SuggestRequest, TaskBook, TaskRecord, TimeInterval};

#[derive(Parser)]
#[command(name = "slots", version, about = "Free time slot suggestions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest free slots for one user on one day
    Suggest {
        /// Task file (JSON array of tasks)
        #[arg(short, long)]
        tasks: PathBuf,
        /// User to suggest slots for
        #[arg(short, long)]
        user: String,
        /// Day to search, as YYYY-MM-DD
        #[arg(short, long)]
        date: String,
        /// Task duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
        /// Buffer in minutes around bookings (defaults to the policy's)
        #[arg(short, long, allow_negative_numbers = true)]
        buffer: Option<i64>,
        /// Policy file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the start of the working day (HH:MM)
        #[arg(long)]
        work_start: Option<String>,
        /// Override the end of the working day (HH:MM)
        #[arg(long)]
        work_end: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Buffer and merge a JSON array of intervals
    Normalize {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Buffer in minutes added to both sides of every interval
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        buffer: i64,
    },
    /// Add, move, remove or list tasks in a task file
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// Add a task
    Add {
        #[arg(short, long)]
        tasks: PathBuf,
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        name: String,
        /// Start time (RFC 3339)
        #[arg(long)]
        start: String,
        /// End time (RFC 3339)
        #[arg(long)]
        end: String,
    },
    /// Move an existing task to a new time range
    Update {
        #[arg(short, long)]
        tasks: PathBuf,
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        name: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Remove a task by name
    Remove {
        #[arg(short, long)]
        tasks: PathBuf,
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        name: String,
    },
    /// List tasks, optionally for a single user
    List {
        #[arg(short, long)]
        tasks: PathBuf,
        #[arg(short, long)]
        user: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Suggest {
            tasks,
            user,
            date,
            duration,
            buffer,
            config,
            work_start,
            work_end,
            format,
        } => {
            let policy = config::load_policy(config.as_deref())?;
            let policy =
                config::apply_overrides(policy, work_start.as_deref(), work_end.as_deref())?;
            let book = load_book(&tasks)?;

            let request = SuggestRequest {
                user_id: user,
                date_str: date,
                duration_minutes: duration,
                buffer_minutes: buffer,
            };
            let response = Scheduler::new(book, policy)
                .suggest(&request)
                .context("Failed to suggest slots")?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Text => {
                    for slot in &response.suggested_slots {
                        println!("{}", slot);
                    }
                }
            }
        }
        Commands::Normalize {
            input,
            output,
            buffer,
        } => {
            let json = read_input(input.as_deref())?;
            let raw: Vec<TimeInterval> =
                serde_json::from_str(&json).context("Failed to parse intervals JSON")?;
            let buffer = Duration::try_minutes(buffer).context("Buffer is out of range")?;
            let merged =
                slot_engine::normalize(&raw, buffer).context("Failed to normalize intervals")?;
            let pretty = serde_json::to_string_pretty(&merged)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Task { action } => run_task(action)?,
    }

    Ok(())
}

fn run_task(action: TaskAction) -> Result<()> {
    match action {
        TaskAction::Add {
            tasks,
            user,
            name,
            start,
            end,
        } => {
            let mut book = load_book(&tasks)?;
            let record = TaskRecord::new(user, name, parse_time(&start)?, parse_time(&end)?);
            let label = record.name.clone();
            book.insert(record).context("Failed to add task")?;
            save_book(&book, &tasks)?;
            println!("Task '{}' added.", label);
        }
        TaskAction::Update {
            tasks,
            user,
            name,
            start,
            end,
        } => {
            let mut book = load_book(&tasks)?;
            book.update(&user, &name, parse_time(&start)?, parse_time(&end)?)
                .context("Failed to update task")?;
            save_book(&book, &tasks)?;
            println!("Task '{}' updated.", name);
        }
        TaskAction::Remove { tasks, user, name } => {
            let mut book = load_book(&tasks)?;
            book.remove(&user, &name).context("Failed to remove task")?;
            save_book(&book, &tasks)?;
            println!("Task '{}' removed.", name);
        }
        TaskAction::List { tasks, user } => {
            let book = load_book(&tasks)?;
            let listed: Vec<&TaskRecord> = book
                .tasks()
                .iter()
                .filter(|t| user.as_deref().is_none_or(|u| t.user_id == u))
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
    }
    Ok(())
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid timestamp '{}': expected RFC 3339", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

fn load_book(path: &Path) -> Result<TaskBook> {
    TaskBook::load(path).with_context(|| format!("Failed to load task file: {}", path.display()))
}

fn save_book(book: &TaskBook, path: &Path) -> Result<()> {
    book.save(path)
        .with_context(|| format!("Failed to write task file: {}", path.display()))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
