//! Busy-interval merging and free-slot derivation.
//!
//! Sorts busy intervals by start time, coalesces overlapping or touching ones,
//! then walks a cursor across the window emitting the gaps.

use chrono::{DateTime, Utc};

use crate::model::Interval;

/// Merge overlapping or adjacent intervals into a minimal disjoint set.
///
/// Returns intervals sorted by start. Touching intervals (`a.end == b.start`)
/// are merged, so consecutive outputs always have a positive gap between them.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                // Overlapping or adjacent -- extend the current interval.
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }

    merged
}

/// Derive the free timeline inside `[now, window_end)` from merged busy intervals.
///
/// `merged_busy` must be sorted and disjoint, as produced by [`merge_intervals`].
/// Busy intervals that end before the cursor are ignored. Every emitted slot has
/// positive length.
pub fn derive_free_slots(
    merged_busy: &[Interval],
    now: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<Interval> {
    let mut free = Vec::new();
    let mut cursor = now;

    for busy in merged_busy {
        if busy.end < cursor || busy.is_empty() {
            continue;
        }
        if busy.start > cursor {
            free.push(Interval::new(cursor, busy.start.min(window_end)));
        }
        cursor = cursor.max(busy.end);
        if cursor >= window_end {
            break;
        }
    }

    // Trailing free slot after the last busy period.
    if cursor < window_end {
        free.push(Interval::new(cursor, window_end));
    }

    free.retain(|slot| !slot.is_empty());
    free
}

/// Merge `busy` and return the free slots within `[window_start, window_end)`.
pub fn find_free_slots(
    busy: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<Interval> {
    derive_free_slots(&merge_intervals(busy), window_start, window_end)
}
