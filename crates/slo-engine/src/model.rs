//! Core data types: recurring commitments, deadline-bound tasks, and intervals.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A recurring weekly busy period, e.g. a class.
///
/// `day`, `start` and `end` are kept as the raw strings the user typed.
/// They are interpreted during expansion, where malformed values degrade
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub id: String,
    #[serde(alias = "name", default)]
    pub label: String,
    /// Free-form weekday label ("Mon", "Tuesday", "จ", "พฤ", "3", ...).
    #[serde(default)]
    pub day: String,
    /// Wall-clock start time, `HH:MM`.
    #[serde(default)]
    pub start: String,
    /// Wall-clock end time, `HH:MM`.
    #[serde(default)]
    pub end: String,
}

impl Commitment {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        day: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            day: day.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A deadline-bound unit of work with an estimated effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(alias = "est", default)]
    pub estimated_hours: f64,
    pub deadline: DateTime<Utc>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        estimated_hours: f64,
        deadline: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimated_hours,
            deadline,
            created_at,
        }
    }

    /// Effort in hours, with negative or non-finite estimates read as zero.
    pub fn effort_hours(&self) -> f64 {
        if self.estimated_hours.is_finite() && self.estimated_hours > 0.0 {
            self.estimated_hours
        } else {
            0.0
        }
    }

    /// The estimate as a millisecond-precision duration.
    pub fn required_duration(&self) -> Duration {
        Duration::milliseconds((self.effort_hours() * 3_600_000.0).round() as i64)
    }
}

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Clip to `[lower, upper]`. The result may be empty.
    pub fn clip(&self, lower: DateTime<Utc>, upper: DateTime<Utc>) -> Interval {
        Interval {
            start: self.start.max(lower),
            end: self.end.min(upper),
        }
    }

    pub fn hours(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 3_600_000.0
    }
}
