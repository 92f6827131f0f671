// Where per-instance usage comes from. The sampler only sees the trait;
// `CfCli` is the production source backed by the `cf` command line.

mod cf;
mod wire;

pub use cf::{CfCli, app_search_path, cf_config_path};
pub use wire::{decode_app_search, decode_space_guid, decode_stats};

use crate::error::SampleError;
use crate::models::InstanceSample;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Instance id -> latest usage for that instance.
pub type InstanceMap = BTreeMap<String, InstanceSample>;

#[async_trait]
pub trait StatSource: Send + Sync {
    /// Current usage of every running instance of `app_guid`.
    async fn fetch(&self, app_guid: &str) -> Result<InstanceMap, SampleError>;
}
