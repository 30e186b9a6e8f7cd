//! The JSON-in, JSON-out layer behind the JavaScript exports.
//!
//! Errors are plain strings here; `lib.rs` turns them into `JsValue`s. Keeping
//! the two apart lets this layer run in native tests.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use slo_engine::store::{StoredState, StoredTask};
use slo_engine::timestamp::parse_timestamp;
use slo_engine::{Commitment, Interval, Planner, PlannerConfig, Task};

#[derive(Serialize)]
struct FreeSlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl From<&Interval> for FreeSlotDto {
    fn from(slot: &Interval) -> Self {
        Self {
            start: slot.start.to_rfc3339(),
            end: slot.end.to_rfc3339(),
            duration_minutes: slot.duration().num_minutes(),
        }
    }
}

/// A planner for `timezone`, or the UTC default when none is given.
fn planner(timezone: Option<&str>) -> Result<Planner, String> {
    let Some(timezone) = timezone.filter(|tz| !tz.trim().is_empty()) else {
        return Ok(Planner::default());
    };
    let config = PlannerConfig {
        timezone: timezone.to_string(),
        ..PlannerConfig::default()
    };
    Planner::new(config).map_err(|e| e.to_string())
}

fn parse_now(now: &str, tz: &Tz) -> Result<DateTime<Utc>, String> {
    parse_timestamp(now, tz).map_err(|e| format!("Invalid 'now': {}", e))
}

fn parse_classes(json: &str) -> Result<Vec<Commitment>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid classes JSON: {}", e))
}

fn parse_task(json: &str, tz: &Tz) -> Result<Task, String> {
    let stored: StoredTask =
        serde_json::from_str(json).map_err(|e| format!("Invalid task JSON: {}", e))?;
    stored.into_task(tz).map_err(|e| e.to_string())
}

fn parse_tasks(json: &str, tz: &Tz) -> Result<Vec<Task>, String> {
    let stored: Vec<StoredTask> =
        serde_json::from_str(json).map_err(|e| format!("Invalid tasks JSON: {}", e))?;
    stored
        .into_iter()
        .map(|t| t.into_task(tz).map_err(|e| e.to_string()))
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

/// Free slots for the week from `now`, as `[{start, end, duration_minutes}]`.
pub fn free_slots(classes_json: &str, now: &str, timezone: Option<&str>) -> Result<String, String> {
    let planner = planner(timezone)?;
    let now = parse_now(now, planner.tz())?;
    let classes = parse_classes(classes_json)?;

    let dtos: Vec<FreeSlotDto> = planner
        .compute_free_slots(&classes, now)
        .iter()
        .map(FreeSlotDto::from)
        .collect();
    to_json(&dtos)
}

pub fn priority(task_json: &str, now: &str, timezone: Option<&str>) -> Result<f64, String> {
    let planner = planner(timezone)?;
    let now = parse_now(now, planner.tz())?;
    let task = parse_task(task_json, planner.tz())?;
    Ok(planner.priority(&task, now))
}

pub fn start_suggestion(
    task_json: &str,
    classes_json: &str,
    now: &str,
    timezone: Option<&str>,
) -> Result<String, String> {
    let planner = planner(timezone)?;
    let now = parse_now(now, planner.tz())?;
    let task = parse_task(task_json, planner.tz())?;
    let classes = parse_classes(classes_json)?;
    to_json(&planner.compute_start_suggestion(&task, &classes, now))
}

pub fn rank_tasks(tasks_json: &str, now: &str, timezone: Option<&str>) -> Result<String, String> {
    let planner = planner(timezone)?;
    let now = parse_now(now, planner.tz())?;
    let tasks = parse_tasks(tasks_json, planner.tz())?;
    to_json(&planner.rank_tasks(&tasks, now))
}

/// Suggestions for every task in a stored `{classes, tasks}` document.
pub fn auto_plan(state_json: &str, now: &str, timezone: Option<&str>) -> Result<String, String> {
    let planner = planner(timezone)?;
    let now = parse_now(now, planner.tz())?;
    let stored: StoredState =
        serde_json::from_str(state_json).map_err(|e| format!("Invalid state JSON: {}", e))?;
    let state = stored.into_state(planner.tz()).map_err(|e| e.to_string())?;
    to_json(&planner.auto_plan(&state, now))
}
