//! Tests for busy-interval merging and free-slot derivation.

use chrono::{TimeZone, Utc};
use slo_engine::freebusy::{derive_free_slots, find_free_slots, merge_intervals};
use slo_engine::model::Interval;

/// Helper to create an Interval from hour ranges on a given day.
fn iv(day: u32, start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(
        Utc.with_ymd_and_hms(2026, 3, day, start_hour, start_min, 0)
            .unwrap(),
        Utc.with_ymd_and_hms(2026, 3, day, end_hour, end_min, 0)
            .unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

#[test]
fn overlapping_intervals_merge_into_one() {
    // 09:00-10:00 and 09:30-11:00 → 09:00-11:00
    let merged = merge_intervals(&[iv(16, 9, 0, 10, 0), iv(16, 9, 30, 11, 0)]);
    assert_eq!(merged, vec![iv(16, 9, 0, 11, 0)]);
}

#[test]
fn adjacent_intervals_merge() {
    // 09:00-10:00 touching 10:00-11:00
    let merged = merge_intervals(&[iv(16, 10, 0, 11, 0), iv(16, 9, 0, 10, 0)]);
    assert_eq!(merged, vec![iv(16, 9, 0, 11, 0)]);
}

#[test]
fn contained_interval_is_absorbed() {
    let merged = merge_intervals(&[iv(16, 8, 0, 12, 0), iv(16, 9, 0, 10, 0)]);
    assert_eq!(merged, vec![iv(16, 8, 0, 12, 0)]);
}

#[test]
fn disjoint_intervals_are_sorted() {
    let merged = merge_intervals(&[
        iv(17, 9, 0, 10, 0),
        iv(16, 14, 0, 15, 0),
        iv(16, 9, 0, 10, 0),
    ]);
    assert_eq!(
        merged,
        vec![iv(16, 9, 0, 10, 0), iv(16, 14, 0, 15, 0), iv(17, 9, 0, 10, 0)]
    );
}

#[test]
fn cascading_overlaps_collapse() {
    let merged = merge_intervals(&[
        iv(16, 9, 0, 10, 30),
        iv(16, 10, 0, 11, 30),
        iv(16, 11, 0, 12, 0),
    ]);
    assert_eq!(merged, vec![iv(16, 9, 0, 12, 0)]);
}

#[test]
fn empty_input_merges_to_empty() {
    assert!(merge_intervals(&[]).is_empty());
}

// ---------------------------------------------------------------------------
// Free slots
// ---------------------------------------------------------------------------

#[test]
fn single_busy_block_produces_two_free_slots() {
    // Window: 08:00-17:00, Busy: 10:00-11:00
    let slots = find_free_slots(
        &[iv(16, 10, 0, 11, 0)],
        iv(16, 8, 0, 17, 0).start,
        iv(16, 8, 0, 17, 0).end,
    );

    assert_eq!(slots, vec![iv(16, 8, 0, 10, 0), iv(16, 11, 0, 17, 0)]);
    assert_eq!(slots[0].duration().num_minutes(), 120);
    assert_eq!(slots[1].duration().num_minutes(), 360);
}

#[test]
fn busy_block_starting_at_now_leaves_no_leading_slot() {
    // Monday 08:00 with a class 08:00-09:00: first free slot starts at 09:00.
    let window = iv(16, 8, 0, 18, 0);
    let slots = derive_free_slots(&[iv(16, 8, 0, 9, 0)], window.start, window.end);
    assert_eq!(slots, vec![iv(16, 9, 0, 18, 0)]);
}

#[test]
fn busy_blocks_in_the_past_are_ignored() {
    let window = iv(16, 12, 0, 18, 0);
    let slots = derive_free_slots(&[iv(16, 8, 0, 9, 0)], window.start, window.end);
    assert_eq!(slots, vec![window]);
}

#[test]
fn busy_block_spanning_now_pushes_cursor() {
    // Now is 09:30, in the middle of 09:00-11:00.
    let window = iv(16, 9, 30, 18, 0);
    let slots = derive_free_slots(&[iv(16, 9, 0, 11, 0)], window.start, window.end);
    assert_eq!(slots, vec![iv(16, 11, 0, 18, 0)]);
}

#[test]
fn busy_beyond_window_end_does_not_extend_free_time() {
    let window = iv(16, 8, 0, 12, 0);
    let slots = derive_free_slots(&[iv(16, 14, 0, 15, 0)], window.start, window.end);
    assert_eq!(slots, vec![window]);
}

#[test]
fn no_busy_blocks_whole_window_is_free() {
    let window = iv(16, 8, 0, 17, 0);
    let slots = find_free_slots(&[], window.start, window.end);
    assert_eq!(slots, vec![window]);
    assert_eq!(slots[0].duration().num_minutes(), 540); // 9 hours
}

#[test]
fn busy_filling_window_leaves_nothing() {
    let window = iv(16, 9, 0, 12, 0);
    let slots = find_free_slots(&[iv(16, 9, 0, 12, 0)], window.start, window.end);
    assert!(slots.is_empty());
}

#[test]
fn multiple_gaps_between_busy_blocks() {
    // Busy: 09-10, 12-13, 15-16; window 08-18
    let window = iv(16, 8, 0, 18, 0);
    let slots = find_free_slots(
        &[iv(16, 9, 0, 10, 0), iv(16, 12, 0, 13, 0), iv(16, 15, 0, 16, 0)],
        window.start,
        window.end,
    );

    let minutes: Vec<i64> = slots.iter().map(|s| s.duration().num_minutes()).collect();
    assert_eq!(minutes, vec![60, 120, 120, 120]);
}
