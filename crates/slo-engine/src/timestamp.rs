//! Parsing of task timestamps as they arrive from forms and stored state.
//!
//! Accepts RFC 3339 (`2026-10-20T18:00:00+07:00`), naive local date-times as a
//! `datetime-local` input produces them (`2026-10-20T18:00`), bare dates, and
//! epoch milliseconds. Naive values are read in the planner's timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{PlanError, Result};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A timestamp in one of the accepted wire forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    EpochMillis(i64),
    Text(String),
}

impl RawTimestamp {
    pub fn resolve(&self, tz: &Tz) -> Result<DateTime<Utc>> {
        match self {
            RawTimestamp::EpochMillis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or_else(|| PlanError::InvalidTimestamp(ms.to_string())),
            RawTimestamp::Text(text) => parse_timestamp(text, tz),
        }
    }
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        RawTimestamp::Text(dt.to_rfc3339())
    }
}

/// Parse a textual timestamp, reading zone-less values in `tz`.
pub fn parse_timestamp(text: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .ok_or_else(|| PlanError::InvalidTimestamp(text.to_string()))?;

    DstPolicy::ShiftForward
        .localize(tz, naive)
        .ok_or_else(|| PlanError::InvalidTimestamp(text.to_string()))
}
