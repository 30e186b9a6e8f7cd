//! Urgency scoring and task ranking.
//!
//! `score = effort_hours / hours_left + 0.01 / (1 + age_hours)`
//!
//! `hours_left` is floored at 0.01 so overdue tasks get a very large score and
//! sort first. The age term is a small tie-breaker that shrinks as a task ages,
//! so of two otherwise equal tasks the more recently created one ranks first.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::Task;

/// Lower bound on hours remaining before the deadline.
pub const MIN_HOURS_LEFT: f64 = 0.01;

/// Weight of the age tie-breaker.
pub const AGE_WEIGHT: f64 = 0.01;

const MS_PER_HOUR: f64 = 3_600_000.0;

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_HOUR
}

/// Urgency score for `task` at `now`. Higher is more urgent.
pub fn priority(task: &Task, now: DateTime<Utc>) -> f64 {
    let hours_left = hours_between(now, task.deadline).max(MIN_HOURS_LEFT);
    // A created_at in the future counts as brand new.
    let age_hours = hours_between(task.created_at, now).max(0.0);
    task.effort_hours() / hours_left + AGE_WEIGHT * (1.0 / (1.0 + age_hours))
}

/// A task paired with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTask<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub priority: f64,
}

/// Order tasks by descending score. Equal scores keep their input order.
pub fn rank_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<RankedTask<'_>> {
    let mut ranked: Vec<RankedTask<'_>> = tasks
        .iter()
        .map(|task| RankedTask {
            task,
            priority: priority(task, now),
        })
        .collect();

    // sort_by is stable, so ties stay in creation order.
    ranked.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    ranked
}
