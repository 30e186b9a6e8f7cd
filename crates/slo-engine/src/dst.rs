//! DST transition policies for wall-clock commitment times.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Policy for wall-clock times that do not exist in the zone (spring-forward gap).
///
/// Ambiguous times (fall-back overlap) always take the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop the occurrence.
    Skip,
    /// Move past the gap by its length, the way a browser `Date` normalizes
    /// `setHours` (02:30 on a 02:00 -> 03:00 night becomes 03:30).
    #[default]
    ShiftForward,
}

impl DstPolicy {
    /// Resolve a local wall-clock time to an instant under this policy.
    pub fn localize(self, tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => match self {
                DstPolicy::Skip => None,
                DstPolicy::ShiftForward => {
                    // Read the time with the offset in force before the gap.
                    let before = tz
                        .offset_from_local_datetime(&(local - Duration::hours(3)))
                        .earliest()?
                        .fix();
                    let utc = local - Duration::seconds(i64::from(before.local_minus_utc()));
                    Some(utc.and_utc())
                }
            },
        }
    }
}
