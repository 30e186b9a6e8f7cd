//! Busy-interval generation -- expands weekly commitments into concrete dated intervals.
//!
//! Each commitment's day label is resolved to a weekday, then every local calendar
//! day touched by the window (end date inclusive) with that weekday yields one
//! busy interval built from the commitment's wall-clock start and end.
//!
//! Nothing here fails. Commitments that cannot produce an interval are skipped
//! and reported in [`Expansion::degraded`] so callers can surface them.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::model::{Commitment, Interval};
use crate::weekday::{resolve_weekday, WeekdayResolution};

/// One dated occurrence of a commitment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub commitment_id: String,
    pub label: String,
}

impl BusyInterval {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Why a commitment contributed nothing, or contributed on a guessed day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Degradation {
    /// The day label was blank; the commitment was skipped.
    MissingDay,
    /// The day label was not recognized and today's weekday was used.
    DefaultedWeekday { token: String, weekday: chrono::Weekday },
    /// A start or end time could not be read; the commitment was skipped.
    MalformedTime { value: String },
    /// End is not after start; the commitment was skipped.
    InvertedInterval { start: String, end: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradedCommitment {
    pub commitment_id: String,
    #[serde(flatten)]
    pub degradation: Degradation,
}

/// Result of expanding a set of commitments over a window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    pub busy: Vec<BusyInterval>,
    /// At most one entry per commitment: the reason it was skipped, or the
    /// defaulted weekday it was placed on.
    pub degraded: Vec<DegradedCommitment>,
}

impl Expansion {
    pub fn intervals(&self) -> Vec<Interval> {
        self.busy.iter().map(BusyInterval::interval).collect()
    }
}

/// Parse a wall-clock time into minutes after midnight.
///
/// Accepts `H:MM`, `HH:MM` and `HH:MM:SS` (seconds are ignored). Hours run
/// 0-24, where `24:00` means the following midnight. An empty string reads as
/// midnight. Anything else is `None`.
pub fn parse_time_of_day(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Some(0);
    }

    let mut parts = value.split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    if let Some(seconds) = parts.next() {
        let seconds: u32 = seconds.trim().parse().ok()?;
        if seconds > 59 {
            return None;
        }
    }
    if parts.next().is_some() || minutes > 59 || hours > 24 || (hours == 24 && minutes > 0) {
        return None;
    }
    Some(hours * 60 + minutes)
}

fn wall_clock(date: NaiveDate, minutes: u32) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN) + Duration::minutes(i64::from(minutes))
}

/// Expand commitments into busy intervals for every matching day of the window.
///
/// # Arguments
/// - `commitments` -- the recurring commitments to expand
/// - `window_start` / `window_end` -- the planning window; local dates from the
///   start date through the end date (inclusive) are walked
/// - `tz` -- zone in which commitment times are wall-clock times
/// - `policy` -- how to treat times that fall in a DST gap
pub fn expand_commitments(
    commitments: &[Commitment],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    tz: &Tz,
    policy: DstPolicy,
) -> Expansion {
    let mut expansion = Expansion::default();
    if window_end < window_start {
        return expansion;
    }

    let first_day = window_start.with_timezone(tz).date_naive();
    let last_day = window_end.with_timezone(tz).date_naive();
    let today = first_day.weekday();

    for commitment in commitments {
        let mut degrade = |degradation: Degradation| {
            tracing::warn!(
                commitment_id = %commitment.id,
                ?degradation,
                "commitment degraded during expansion"
            );
            expansion.degraded.push(DegradedCommitment {
                commitment_id: commitment.id.clone(),
                degradation,
            });
        };

        let Some(resolution) = resolve_weekday(&commitment.day, today) else {
            degrade(Degradation::MissingDay);
            continue;
        };

        let (start_min, end_min) = match (
            parse_time_of_day(&commitment.start),
            parse_time_of_day(&commitment.end),
        ) {
            (Some(s), Some(e)) => (s, e),
            (None, _) => {
                degrade(Degradation::MalformedTime {
                    value: commitment.start.clone(),
                });
                continue;
            }
            (_, None) => {
                degrade(Degradation::MalformedTime {
                    value: commitment.end.clone(),
                });
                continue;
            }
        };

        if end_min <= start_min {
            degrade(Degradation::InvertedInterval {
                start: commitment.start.clone(),
                end: commitment.end.clone(),
            });
            continue;
        }

        // Only reported once the commitment is known to contribute.
        if let WeekdayResolution::Defaulted(w) = resolution {
            degrade(Degradation::DefaultedWeekday {
                token: commitment.day.clone(),
                weekday: w,
            });
        }
        let weekday = resolution.weekday();

        for date in first_day.iter_days().take_while(|d| *d <= last_day) {
            if date.weekday() != weekday {
                continue;
            }
            let start = policy.localize(tz, wall_clock(date, start_min));
            let end = policy.localize(tz, wall_clock(date, end_min));
            let (Some(start), Some(end)) = (start, end) else {
                tracing::debug!(commitment_id = %commitment.id, %date, "occurrence falls in a DST gap");
                continue;
            };
            // DST can still collapse a short occurrence.
            if end <= start {
                continue;
            }
            expansion.busy.push(BusyInterval {
                start,
                end,
                commitment_id: commitment.id.clone(),
                label: commitment.label.clone(),
            });
        }
    }

    tracing::debug!(
        commitments = commitments.len(),
        intervals = expansion.busy.len(),
        degraded = expansion.degraded.len(),
        "expanded commitments"
    );
    expansion
}
