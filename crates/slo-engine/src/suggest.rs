//! Start-time suggestions: place a task's effort into the free timeline before
//! its deadline.
//!
//! Two passes, first match wins:
//!
//! 1. **Contiguous** -- the first free slot that, clipped to `[now, deadline]`,
//!    is long enough for the whole task.
//! 2. **Split** -- greedily fill clipped slots in order until the effort is
//!    covered.
//!
//! If neither works the task is [`Suggestion::Infeasible`], which is an ordinary
//! outcome rather than an error.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Interval, Task};

/// One piece of a split placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionPart {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_ms: i64,
}

impl SuggestionPart {
    fn new(start: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            start,
            end: start + duration,
            duration_ms: duration.num_milliseconds(),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::milliseconds(self.duration_ms)
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Where a task should be worked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// One uninterrupted block finishing at or before the deadline.
    Contiguous {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        deadline: DateTime<Utc>,
    },
    /// The effort spread across several free slots, in time order.
    Split { parts: Vec<SuggestionPart> },
    /// No placement completes the task before its deadline.
    Infeasible,
}

impl Suggestion {
    pub fn is_feasible(&self) -> bool {
        !matches!(self, Suggestion::Infeasible)
    }

    /// When work should begin, if there is a placement.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        match self {
            Suggestion::Contiguous { start, .. } => Some(*start),
            Suggestion::Split { parts } => parts.first().map(|p| p.start),
            Suggestion::Infeasible => None,
        }
    }

    /// Total time placed.
    pub fn scheduled_duration(&self) -> Duration {
        match self {
            Suggestion::Contiguous { start, end, .. } => *end - *start,
            Suggestion::Split { parts } => parts
                .iter()
                .fold(Duration::zero(), |acc, p| acc + p.duration()),
            Suggestion::Infeasible => Duration::zero(),
        }
    }

    /// The placed blocks, one for a contiguous result.
    pub fn blocks(&self) -> Vec<Interval> {
        match self {
            Suggestion::Contiguous { start, end, .. } => vec![Interval::new(*start, *end)],
            Suggestion::Split { parts } => parts.iter().map(SuggestionPart::interval).collect(),
            Suggestion::Infeasible => Vec::new(),
        }
    }
}

/// Free slots that are not over yet, clipped to `[now, deadline]`, empty ones dropped.
fn usable_slots(
    free: &[Interval],
    now: DateTime<Utc>,
    deadline: DateTime<Utc>,
) -> impl Iterator<Item = Interval> + '_ {
    free.iter()
        .filter(move |slot| slot.end > now)
        .map(move |slot| slot.clip(now, deadline))
        .filter(|clipped| !clipped.is_empty())
}

/// Suggest when to work on `task` given the free timeline at `now`.
///
/// `free` must be sorted by start, as produced by
/// [`derive_free_slots`](crate::freebusy::derive_free_slots).
pub fn suggest(task: &Task, free: &[Interval], now: DateTime<Utc>) -> Suggestion {
    let required = task.required_duration();
    let deadline = task.deadline;

    if let Some(slot) =
        usable_slots(free, now, deadline).find(|clipped| clipped.duration() >= required)
    {
        return Suggestion::Contiguous {
            start: slot.start,
            end: slot.start + required,
            deadline,
        };
    }

    let mut remaining = required;
    let mut parts = Vec::new();
    for clipped in usable_slots(free, now, deadline) {
        let take = remaining.min(clipped.duration());
        parts.push(SuggestionPart::new(clipped.start, take));
        remaining = remaining - take;
        if remaining <= Duration::zero() {
            break;
        }
    }

    if remaining <= Duration::zero() && !parts.is_empty() {
        tracing::debug!(task_id = %task.id, parts = parts.len(), "split placement");
        Suggestion::Split { parts }
    } else {
        tracing::debug!(
            task_id = %task.id,
            short_by_minutes = remaining.num_minutes(),
            "no placement before deadline"
        );
        Suggestion::Infeasible
    }
}
