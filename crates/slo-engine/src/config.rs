//! Planner configuration.

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{PlanError, Result};

const MAX_REFRESH_SECS: u64 = 86_400;
const MAX_HORIZON_DAYS: u32 = 366;

/// Tunables for free-time computation and live refresh.
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Length of the planning window, in days from `now`.
    pub horizon_days: u32,
    /// IANA zone in which commitment times are wall-clock times.
    pub timezone: String,
    /// Treatment of commitment times that fall in a DST gap.
    pub dst_policy: DstPolicy,
    /// Period of live suggestion refresh.
    pub refresh_interval_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: 7,
            timezone: "UTC".to_string(),
            dst_policy: DstPolicy::default(),
            refresh_interval_secs: 60,
        }
    }
}

impl PlannerConfig {
    /// Parse a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and that the timezone is a known IANA identifier.
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(PlanError::InvalidConfig(
                "horizon_days must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_REFRESH_SECS).contains(&self.refresh_interval_secs) {
            return Err(PlanError::InvalidConfig(format!(
                "refresh_interval_secs must be between 1 and {MAX_REFRESH_SECS}"
            )));
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(PlanError::InvalidConfig(format!(
                "horizon_days must be at most {MAX_HORIZON_DAYS}"
            )));
        }
        self.tz().map(|_| ())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| PlanError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn horizon(&self) -> Duration {
        Duration::days(i64::from(self.horizon_days.min(MAX_HORIZON_DAYS)))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::seconds(self.refresh_interval_secs.min(MAX_REFRESH_SECS) as i64)
    }
}
