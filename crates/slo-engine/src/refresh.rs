//! Live refresh of one task's suggestion on a fixed interval.
//!
//! At most one refresh is active. Starting a new one replaces the previous one.
//! The schedule does not own a timer. The caller drives it by calling
//! [`RefreshSchedule::poll`] with the current time, so it works the same under a
//! sleep loop, a UI timer, or a test with a fake clock.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::planner::Planner;
use crate::store::PlannerState;
use crate::suggest::Suggestion;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveRefresh {
    task_id: String,
    next_due: DateTime<Utc>,
}

/// What a call to [`RefreshSchedule::poll`] produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// No refresh is active.
    Idle,
    /// The active refresh is not due yet.
    NotDue { next_due: DateTime<Utc> },
    /// The suggestion was recomputed.
    Refreshed {
        task_id: String,
        suggestion: Suggestion,
        next_due: DateTime<Utc>,
    },
    /// The task no longer exists; the refresh has stopped.
    TaskMissing { task_id: String },
}

#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Duration,
    active: Option<ActiveRefresh>,
}

impl RefreshSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::seconds(1)),
            active: None,
        }
    }

    pub fn for_planner(planner: &Planner) -> Self {
        Self::new(planner.config().refresh_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Begin refreshing `task_id`, first due one interval after `now`.
    ///
    /// Returns the id of the refresh this replaced, if any.
    pub fn start(&mut self, task_id: impl Into<String>, now: DateTime<Utc>) -> Option<String> {
        let task_id = task_id.into();
        tracing::debug!(%task_id, "live refresh started");
        self.active
            .replace(ActiveRefresh {
                task_id,
                next_due: now + self.interval,
            })
            .map(|previous| previous.task_id)
    }

    /// Stop the active refresh, returning its task id.
    pub fn cancel(&mut self) -> Option<String> {
        self.active.take().map(|a| a.task_id)
    }

    pub fn active_task(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.task_id.as_str())
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.active.as_ref().map(|a| a.next_due)
    }

    /// Recompute the active task's suggestion if it is due at `now`.
    ///
    /// Ticks missed while the caller was not polling are skipped, not replayed:
    /// the next due time is the first interval boundary after `now`.
    pub fn poll(
        &mut self,
        planner: &Planner,
        state: &PlannerState,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        let Some(active) = self.active.as_mut() else {
            return RefreshOutcome::Idle;
        };
        if now < active.next_due {
            return RefreshOutcome::NotDue {
                next_due: active.next_due,
            };
        }

        let Some(task) = state.task(&active.task_id) else {
            let task_id = active.task_id.clone();
            tracing::debug!(%task_id, "live refresh stopped, task is gone");
            self.active = None;
            return RefreshOutcome::TaskMissing { task_id };
        };

        let interval_ms = self.interval.num_milliseconds();
        let overdue_ms = (now - active.next_due).num_milliseconds();
        active.next_due += Duration::milliseconds((overdue_ms / interval_ms + 1) * interval_ms);

        RefreshOutcome::Refreshed {
            task_id: active.task_id.clone(),
            suggestion: planner.compute_start_suggestion(task, &state.classes, now),
            next_due: active.next_due,
        }
    }
}
