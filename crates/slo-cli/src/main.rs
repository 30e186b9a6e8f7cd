//! `slo` CLI -- free time, task ranking and start suggestions from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Free/busy for the next seven days (state from stdin)
//! cat state.json | slo free
//!
//! # Tasks by urgency, at a fixed instant
//! slo --state state.json --now 2026-03-16T08:00:00Z rank
//!
//! # When to start one task, class times read in Bangkok time
//! slo --state state.json --timezone Asia/Bangkok suggest --task t_1
//!
//! # Suggestions for every task, most urgent first
//! slo --state state.json plan
//!
//! # Re-print one task's suggestion every refresh interval (5 times)
//! slo --state state.json watch --task t_1 --count 5
//! ```
//!
//! The state file is the `{ "classes": [...], "tasks": [...] }` document the
//! web front end persists. All output is JSON on stdout; logs go to stderr.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slo_engine::timestamp::parse_timestamp;
use slo_engine::{
    Availability, Planner, PlannerConfig, PlannerState, RefreshOutcome, RefreshSchedule,
    Suggestion,
};
use std::io::{self, Read};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slo",
    version,
    about = "Find free time around your classes and plan tasks before their deadlines"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// State file with classes and tasks (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    state: Option<String>,

    /// Planner configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// IANA timezone for class times and naive deadlines (overrides config)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Planning window length in days (overrides config)
    #[arg(long, global = true)]
    horizon_days: Option<u32>,

    /// Evaluate at this instant instead of the current time
    #[arg(long, global = true)]
    now: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show busy blocks, free slots and total free hours
    Free,
    /// List tasks by urgency, highest first
    Rank,
    /// Suggest when to start one task
    Suggest {
        /// Task id
        #[arg(short, long)]
        task: String,
    },
    /// Suggest start times for every task, most urgent first
    Plan,
    /// Re-evaluate one task's suggestion on the refresh interval
    Watch {
        /// Task id
        #[arg(short, long)]
        task: String,
        /// Stop after this many evaluations (0 = run until the task disappears)
        #[arg(long, default_value_t = 0)]
        count: u32,
    },
}

#[derive(Serialize)]
struct FreeOutput<'a> {
    #[serde(flatten)]
    availability: &'a Availability,
    total_free_hours: f64,
}

#[derive(Serialize)]
struct SuggestOutput<'a> {
    task_id: &'a str,
    evaluated_at: DateTime<Utc>,
    suggestion: &'a Suggestion,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slo=info,slo_engine=warn")),
        )
        .init();

    let cli = Cli::parse();
    let planner = build_planner(&cli)?;
    let now = match cli.now.as_deref() {
        Some(raw) => parse_timestamp(raw, planner.tz())
            .with_context(|| format!("Invalid --now value: {}", raw))?,
        None => Utc::now(),
    };
    let state = load_state(cli.state.as_deref(), &planner)?;

    match &cli.command {
        Commands::Free => {
            let availability = planner.availability(&state.classes, now);
            print_json(&FreeOutput {
                availability: &availability,
                total_free_hours: availability.total_free_hours(),
            })?;
        }
        Commands::Rank => {
            print_json(&planner.rank_tasks(&state.tasks, now))?;
        }
        Commands::Suggest { task } => {
            let found = state
                .task(task)
                .ok_or_else(|| anyhow!("Unknown task id: '{}'", task))?;
            let suggestion = planner.compute_start_suggestion(found, &state.classes, now);
            print_json(&SuggestOutput {
                task_id: task,
                evaluated_at: now,
                suggestion: &suggestion,
            })?;
        }
        Commands::Plan => {
            let plan = planner.auto_plan(&state, now);
            if plan.is_empty() {
                tracing::info!("no tasks to plan");
            }
            print_json(&plan)?;
        }
        Commands::Watch { task, count } => {
            watch(&cli, &planner, state, task, *count, now)?;
        }
    }

    Ok(())
}

/// Build the planner from `--config`, then apply flag overrides.
fn build_planner(cli: &Cli) -> Result<Planner> {
    let mut config = match cli.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            PlannerConfig::from_json(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => PlannerConfig::default(),
    };
    if let Some(tz) = &cli.timezone {
        config.timezone = tz.clone();
    }
    if let Some(days) = cli.horizon_days {
        config.horizon_days = days;
    }
    Planner::new(config).context("Invalid planner configuration")
}

fn load_state(path: Option<&str>, planner: &Planner) -> Result<PlannerState> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    PlannerState::from_json(&raw, planner.tz()).context("Failed to parse state")
}

/// Print the suggestion now, then again on every refresh tick.
///
/// When the state comes from a file it is re-read before each tick, so edits
/// (including deleting the task) are picked up.
fn watch(
    cli: &Cli,
    planner: &Planner,
    mut state: PlannerState,
    task_id: &str,
    count: u32,
    start: DateTime<Utc>,
) -> Result<()> {
    let found = state
        .task(task_id)
        .ok_or_else(|| anyhow!("Unknown task id: '{}'", task_id))?;
    let suggestion = planner.compute_start_suggestion(found, &state.classes, start);
    print_line(&SuggestOutput {
        task_id,
        evaluated_at: start,
        suggestion: &suggestion,
    })?;

    let mut schedule = RefreshSchedule::for_planner(planner);
    schedule.start(task_id, start);
    let clock = Instant::now();
    let current = || -> Result<DateTime<Utc>> {
        Ok(start + chrono::Duration::from_std(clock.elapsed())?)
    };

    let mut evaluations = 1;
    while count == 0 || evaluations < count {
        let Some(due) = schedule.next_due() else {
            break;
        };
        if let Ok(wait) = (due - current()?).to_std() {
            std::thread::sleep(wait);
        }
        if cli.state.is_some() {
            match load_state(cli.state.as_deref(), planner) {
                Ok(fresh) => state = fresh,
                Err(e) => tracing::warn!(error = %e, "keeping previous state"),
            }
        }

        let now = current()?;
        match schedule.poll(planner, &state, now) {
            RefreshOutcome::Refreshed {
                task_id,
                suggestion,
                ..
            } => {
                print_line(&SuggestOutput {
                    task_id: &task_id,
                    evaluated_at: now,
                    suggestion: &suggestion,
                })?;
                evaluations += 1;
            }
            RefreshOutcome::NotDue { .. } => {}
            RefreshOutcome::TaskMissing { task_id } => {
                tracing::info!(%task_id, "task removed, stopping");
                break;
            }
            RefreshOutcome::Idle => break,
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_line<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
