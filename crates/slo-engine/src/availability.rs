//! The full free/busy picture for a planning window.
//!
//! Runs the pipeline end to end -- expand commitments, merge busy intervals,
//! derive free slots -- and keeps the intermediate busy set and any degraded
//! commitments alongside the free timeline, so one call gives a caller
//! everything it needs to render or summarize the week.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::expander::{expand_commitments, DegradedCommitment};
use crate::freebusy::{derive_free_slots, merge_intervals};
use crate::model::{Commitment, Interval};

/// Free/busy result for `[window_start, window_end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    /// The analysis window start (the `now` the result was computed for).
    pub window_start: DateTime<Utc>,
    /// The analysis window end.
    pub window_end: DateTime<Utc>,
    /// Merged busy blocks clipped to the window (sorted, non-overlapping).
    pub busy: Vec<Interval>,
    /// Free slots (gaps between busy blocks within the window).
    pub free: Vec<Interval>,
    /// Commitments that were skipped or placed on a fallback weekday.
    pub degraded: Vec<DegradedCommitment>,
}

impl Availability {
    /// Sum of free time in the window, in hours.
    pub fn total_free_hours(&self) -> f64 {
        self.free.iter().map(Interval::hours).sum()
    }

    /// Sum of busy time in the window, in hours.
    pub fn total_busy_hours(&self) -> f64 {
        self.busy.iter().map(Interval::hours).sum()
    }
}

/// Compute availability for `commitments` over `[now, window_end)`.
///
/// An empty or inverted window yields no free and no busy time.
pub fn compute_availability(
    commitments: &[Commitment],
    now: DateTime<Utc>,
    window_end: DateTime<Utc>,
    tz: &Tz,
    policy: DstPolicy,
) -> Availability {
    if window_end <= now {
        return Availability {
            window_start: now,
            window_end,
            busy: vec![],
            free: vec![],
            degraded: vec![],
        };
    }

    let expansion = expand_commitments(commitments, now, window_end, tz, policy);
    let merged = merge_intervals(&expansion.intervals());
    let free = derive_free_slots(&merged, now, window_end);

    let busy: Vec<Interval> = merged
        .iter()
        .map(|iv| iv.clip(now, window_end))
        .filter(|iv| !iv.is_empty())
        .collect();

    let availability = Availability {
        window_start: now,
        window_end,
        busy,
        free,
        degraded: expansion.degraded,
    };
    tracing::debug!(
        busy = availability.busy.len(),
        free = availability.free.len(),
        free_hours = availability.total_free_hours(),
        "computed availability"
    );
    availability
}
