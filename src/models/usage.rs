// Per-instance usage as reported by the platform

use chrono::{DateTime, Utc};

use crate::error::SampleError;

/// Layout of the platform's usage `time` field, e.g. `2014-12-07 16:41:05 +0000`.
pub const USAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, PartialEq)]
pub struct UsageSample {
    /// Fraction of one core (0.25 = a quarter of a core).
    pub cpu: f64,
    pub memory_bytes: u64,
    pub disk_bytes: u64,
    pub reported_at: DateTime<Utc>,
}

impl UsageSample {
    /// Same report time, all counters zeroed.
    pub fn zeroed(&self) -> Self {
        Self {
            cpu: 0.0,
            memory_bytes: 0,
            disk_bytes: 0,
            reported_at: self.reported_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSample {
    /// Instance index as a string key ("0", "1", ...).
    pub instance_id: String,
    /// Platform state, e.g. "RUNNING".
    pub state: String,
    pub usage: UsageSample,
}

/// Parse a usage `time` field in [`USAGE_TIME_FORMAT`].
pub fn parse_usage_time(value: &str) -> Result<DateTime<Utc>, SampleError> {
    DateTime::parse_from_str(value, USAGE_TIME_FORMAT)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| SampleError::BadTimestamp {
            value: value.to_string(),
            source,
        })
}
