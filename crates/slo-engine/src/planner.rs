//! The planner context: configuration plus the operations the application calls.

use chrono::{DateTime, Days, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::availability::{compute_availability, Availability};
use crate::config::PlannerConfig;
use crate::dst::DstPolicy;
use crate::error::Result;
use crate::model::{Commitment, Interval, Task};
use crate::priority::{self, RankedTask};
use crate::store::PlannerState;
use crate::suggest::{suggest, Suggestion};

/// A task's place in an auto-plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry<'a> {
    pub task: &'a Task,
    pub priority: f64,
    pub suggestion: Suggestion,
}

/// Validated configuration with the timezone already parsed.
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    tz: Tz,
}

impl Default for Planner {
    fn default() -> Self {
        Self {
            config: PlannerConfig::default(),
            tz: Tz::UTC,
        }
    }
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let tz = config.tz()?;
        Ok(Self { config, tz })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn tz(&self) -> &Tz {
        &self.tz
    }

    /// End of the planning window that starts at `now`.
    ///
    /// The horizon is counted in local calendar days, so a window that crosses
    /// a DST change ends at the same wall-clock time as `now`, not after a
    /// fixed number of hours.
    pub fn window_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = Days::new(self.config.horizon().num_days().unsigned_abs());
        now.with_timezone(&self.tz)
            .naive_local()
            .checked_add_days(days)
            .and_then(|local| DstPolicy::ShiftForward.localize(&self.tz, local))
            .unwrap_or_else(|| now + self.config.horizon())
    }

    pub fn availability(&self, classes: &[Commitment], now: DateTime<Utc>) -> Availability {
        compute_availability(
            classes,
            now,
            self.window_end(now),
            &self.tz,
            self.config.dst_policy,
        )
    }

    /// The free timeline for `[now, window_end(now))`.
    pub fn compute_free_slots(&self, classes: &[Commitment], now: DateTime<Utc>) -> Vec<Interval> {
        self.availability(classes, now).free
    }

    pub fn priority(&self, task: &Task, now: DateTime<Utc>) -> f64 {
        priority::priority(task, now)
    }

    pub fn rank_tasks<'a>(&self, tasks: &'a [Task], now: DateTime<Utc>) -> Vec<RankedTask<'a>> {
        priority::rank_tasks(tasks, now)
    }

    pub fn compute_start_suggestion(
        &self,
        task: &Task,
        classes: &[Commitment],
        now: DateTime<Utc>,
    ) -> Suggestion {
        suggest(task, &self.compute_free_slots(classes, now), now)
    }

    /// Suggest a placement for every task, most urgent first.
    ///
    /// Suggestions are independent: no slot is reserved for one task before
    /// the next is placed, so two entries may overlap.
    pub fn auto_plan<'a>(&self, state: &'a PlannerState, now: DateTime<Utc>) -> Vec<PlanEntry<'a>> {
        let free = self.compute_free_slots(&state.classes, now);
        let plan: Vec<PlanEntry<'a>> = priority::rank_tasks(&state.tasks, now)
            .into_iter()
            .map(|ranked| PlanEntry {
                task: ranked.task,
                priority: ranked.priority,
                suggestion: suggest(ranked.task, &free, now),
            })
            .collect();

        tracing::info!(
            tasks = plan.len(),
            infeasible = plan.iter().filter(|e| !e.suggestion.is_feasible()).count(),
            "auto-plan computed"
        );
        plan
    }

    /// The suggestion for the single most urgent task, if there are any tasks.
    pub fn top_suggestion<'a>(
        &self,
        state: &'a PlannerState,
        now: DateTime<Utc>,
    ) -> Option<PlanEntry<'a>> {
        let top = priority::rank_tasks(&state.tasks, now).into_iter().next()?;
        Some(PlanEntry {
            task: top.task,
            priority: top.priority,
            suggestion: self.compute_start_suggestion(top.task, &state.classes, now),
        })
    }
}
