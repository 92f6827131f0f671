// Nested per-instance samples -> flat string records for the dashboard.
// Per-instance keys are emitted in map order, but consumers must treat the
// key order inside a record as unspecified.

use crate::models::GroupedSample;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

pub type FlatRecord = BTreeMap<String, String>;

/// Canonical rendering of a group timestamp, e.g. `2014-12-07T16:41:05Z`.
pub fn render_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One record per sample, input order preserved.
pub fn flatten(samples: &[GroupedSample]) -> Vec<FlatRecord> {
    samples.iter().map(flatten_one).collect()
}

pub fn flatten_one(sample: &GroupedSample) -> FlatRecord {
    let mut record = FlatRecord::new();
    record.insert("time".to_string(), render_time(&sample.timestamp));
    for (id, instance) in &sample.instances {
        let usage = &instance.usage;
        record.insert(format!("cpu_{id}"), format!("{:.6}", usage.cpu));
        record.insert(format!("mem_{id}"), usage.memory_bytes.to_string());
        record.insert(format!("disk_{id}"), usage.disk_bytes.to_string());
    }
    record
}
