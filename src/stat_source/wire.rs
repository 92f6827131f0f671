// Platform JSON payloads: app stats, app search results, and the cf CLI config file.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::InstanceMap;
use crate::error::{BootstrapError, SampleError};
use crate::models::{InstanceSample, UsageSample, parse_usage_time};

#[derive(Debug, Deserialize)]
struct WireInstance {
    state: String,
    /// Absent for instances that are not running.
    #[serde(default)]
    stats: Option<WireStats>,
}

#[derive(Debug, Deserialize)]
struct WireStats {
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    time: String,
    cpu: f64,
    mem: u64,
    disk: u64,
}

/// Decode a `/v2/apps/<guid>/stats` body. Instances without a usage block are skipped.
pub fn decode_stats(body: &[u8]) -> Result<InstanceMap, SampleError> {
    let raw: BTreeMap<String, WireInstance> =
        serde_json::from_slice(body).map_err(|e| SampleError::Decode {
            reason: e.to_string(),
        })?;

    let mut out = InstanceMap::new();
    for (id, inst) in raw {
        let Some(usage) = inst.stats.and_then(|s| s.usage) else {
            tracing::debug!(instance = %id, state = %inst.state, "instance has no usage; skipped");
            continue;
        };
        let reported_at = parse_usage_time(&usage.time)?;
        out.insert(
            id.clone(),
            InstanceSample {
                instance_id: id,
                state: inst.state,
                usage: UsageSample {
                    cpu: usage.cpu.max(0.0),
                    memory_bytes: usage.mem,
                    disk_bytes: usage.disk,
                    reported_at,
                },
            },
        );
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct AppSearchResults {
    #[serde(default)]
    resources: Vec<AppSearchResource>,
}

#[derive(Debug, Deserialize)]
struct AppSearchResource {
    metadata: AppSearchMetadata,
}

#[derive(Debug, Deserialize)]
struct AppSearchMetadata {
    guid: String,
}

/// GUID of the first app in a `/v2/spaces/<space>/apps?q=name:<name>` body.
pub fn decode_app_search(body: &[u8], app_name: &str) -> Result<String, BootstrapError> {
    let results: AppSearchResults =
        serde_json::from_slice(body).map_err(|e| BootstrapError::Lookup {
            reason: format!("undecodable app search response: {e}"),
        })?;
    results
        .resources
        .into_iter()
        .map(|r| r.metadata.guid)
        .find(|guid| !guid.is_empty())
        .ok_or_else(|| BootstrapError::AppNotFound {
            name: app_name.to_string(),
        })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CliConfig {
    #[serde(default)]
    space_fields: SpaceFields,
}

#[derive(Debug, Default, Deserialize)]
struct SpaceFields {
    #[serde(rename = "GUID", default)]
    guid: String,
}

/// Targeted space GUID from the contents of the cf CLI's `config.json`.
pub fn decode_space_guid(contents: &[u8]) -> Result<String, serde_json::Error> {
    let config: CliConfig = serde_json::from_slice(contents)?;
    Ok(config.space_fields.guid)
}
