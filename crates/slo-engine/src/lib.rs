//! # slo-engine
//!
//! Free-time computation and start-time suggestions for a student's week.
//!
//! Given recurring weekly commitments (classes), deadline-bound tasks and the
//! current instant, the engine works out which parts of the next seven days are
//! free, how urgent each task is, and when each task should start so it is done
//! before its deadline. Every computation is a pure function of its inputs.
//!
//! ## Modules
//!
//! - [`weekday`] -- free-form day labels → weekdays, with explicit fallback
//! - [`expander`] -- weekly commitments → dated busy intervals
//! - [`freebusy`] -- merge busy intervals, derive the free timeline
//! - [`availability`] -- the whole pipeline for one planning window
//! - [`priority`] -- urgency scores and task ranking
//! - [`suggest`] -- contiguous or split placement before a deadline
//! - [`planner`] -- configured entry point, including auto-plan
//! - [`refresh`] -- single live re-evaluation of one task's suggestion
//! - [`store`] -- the application-owned state and its stored JSON form
//! - [`timestamp`] -- task timestamp parsing
//! - [`dst`] -- DST gap policies
//! - [`config`] -- planner configuration
//! - [`error`] -- error types

pub mod availability;
pub mod config;
pub mod dst;
pub mod error;
pub mod expander;
pub mod freebusy;
pub mod model;
pub mod planner;
pub mod priority;
pub mod refresh;
pub mod store;
pub mod suggest;
pub mod timestamp;
pub mod weekday;

pub use availability::{compute_availability, Availability};
pub use config::PlannerConfig;
pub use dst::DstPolicy;
pub use error::PlanError;
pub use expander::{expand_commitments, BusyInterval, DegradedCommitment, Degradation, Expansion};
pub use freebusy::{derive_free_slots, find_free_slots, merge_intervals};
pub use model::{Commitment, Interval, Task};
pub use planner::{PlanEntry, Planner};
pub use priority::{priority, rank_tasks, RankedTask};
pub use refresh::{RefreshOutcome, RefreshSchedule};
pub use store::{PlannerState, StoredState, StoredTask};
pub use suggest::{suggest, Suggestion, SuggestionPart};
pub use weekday::{resolve_weekday, WeekdayResolution};

use chrono::{DateTime, Utc};

/// Free timeline for the seven days from `now`, with UTC wall-clock times.
///
/// Use [`Planner`] to choose another zone or horizon.
pub fn compute_free_slots(classes: &[Commitment], now: DateTime<Utc>) -> Vec<Interval> {
    Planner::default().compute_free_slots(classes, now)
}

/// Start suggestion for `task` under the default [`Planner`].
pub fn compute_start_suggestion(
    task: &Task,
    classes: &[Commitment],
    now: DateTime<Utc>,
) -> Suggestion {
    Planner::default().compute_start_suggestion(task, classes, now)
}
