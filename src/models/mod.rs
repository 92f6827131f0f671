// Domain models: per-instance usage and grouped (per-tick) samples

mod sample;
mod usage;

pub use sample::{GroupedSample, REFERENCE_INSTANCE};
pub use usage::{InstanceSample, USAGE_TIME_FORMAT, UsageSample, parse_usage_time};
