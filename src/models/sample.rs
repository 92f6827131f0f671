// One tick across all instances

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::{InstanceSample, UsageSample};
use crate::error::SampleError;

/// Instance whose report time stamps the whole group.
pub const REFERENCE_INSTANCE: &str = "0";

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSample {
    pub timestamp: DateTime<Utc>,
    pub instances: BTreeMap<String, InstanceSample>,
}

impl GroupedSample {
    /// Group instance samples, stamping the group with instance "0"'s report time.
    /// Fails if instance "0" is absent; there is no fallback clock.
    pub fn from_instances(
        instances: BTreeMap<String, InstanceSample>,
    ) -> Result<Self, SampleError> {
        let timestamp = instances
            .get(REFERENCE_INSTANCE)
            .map(|i| i.usage.reported_at)
            .ok_or(SampleError::MissingReferenceInstance)?;
        Ok(Self {
            timestamp,
            instances,
        })
    }

    /// Copy moved to `timestamp`; every instance's report time shifts by the same
    /// amount. Usage values optionally zeroed.
    pub fn backdated(&self, timestamp: DateTime<Utc>, zero_usage: bool) -> Self {
        let shift = self.timestamp - timestamp;
        let instances = self
            .instances
            .iter()
            .map(|(id, inst)| {
                let usage = if zero_usage {
                    inst.usage.zeroed()
                } else {
                    inst.usage.clone()
                };
                let usage = UsageSample {
                    reported_at: usage.reported_at - shift,
                    ..usage
                };
                (
                    id.clone(),
                    InstanceSample {
                        usage,
                        ..inst.clone()
                    },
                )
            })
            .collect();
        Self {
            timestamp,
            instances,
        }
    }
}
