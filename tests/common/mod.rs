// Shared test helpers
#![allow(dead_code)]

use appstats::error::SampleError;
use appstats::models::*;
use appstats::stat_source::{InstanceMap, StatSource};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// 2014-12-07 16:41:05 UTC plus `offset_secs`.
pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 12, 7, 16, 41, 5).unwrap() + chrono::Duration::seconds(offset_secs)
}

pub fn instance(id: &str, cpu: f64, mem: u64, disk: u64, t: DateTime<Utc>) -> InstanceSample {
    InstanceSample {
        instance_id: id.to_string(),
        state: "RUNNING".to_string(),
        usage: UsageSample {
            cpu,
            memory_bytes: mem,
            disk_bytes: disk,
            reported_at: t,
        },
    }
}

pub fn instances(t: DateTime<Utc>, ids: &[&str]) -> InstanceMap {
    ids.iter()
        .map(|id| (id.to_string(), instance(id, 0.1, 100, 200, t)))
        .collect()
}

pub fn grouped(offset_secs: i64) -> GroupedSample {
    GroupedSample::from_instances(instances(at(offset_secs), &["0"])).unwrap()
}

pub fn grouped_multi(offset_secs: i64, ids: &[&str]) -> GroupedSample {
    GroupedSample {
        timestamp: at(offset_secs),
        instances: instances(at(offset_secs), ids),
    }
}

/// Replays a fixed list of responses, one per fetch; then fails every fetch.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<InstanceMap, SampleError>>>,
    delay: Option<Duration>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<InstanceMap, SampleError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            delay: None,
        }
    }

    /// Every fetch sleeps `delay` before answering.
    pub fn slow(delay: Duration) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            delay: Some(delay),
        }
    }
}

#[async_trait]
impl StatSource for ScriptedSource {
    async fn fetch(&self, _app_guid: &str) -> Result<InstanceMap, SampleError> {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(SampleError::Fetch {
                    reason: "script exhausted".into(),
                })
            })
    }
}
