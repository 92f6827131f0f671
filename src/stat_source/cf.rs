// `cf curl` backed stat source and app name -> GUID resolution

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::instrument;

use super::{InstanceMap, StatSource, wire};
use crate::error::{BootstrapError, SampleError};

/// Runs the cf CLI against the currently targeted API endpoint.
pub struct CfCli {
    binary: String,
}

impl CfCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// `cf curl <path>`; stdout on success. The child is killed if the future is dropped.
    async fn curl(&self, path: &str) -> Result<Vec<u8>, String> {
        let output = Command::new(&self.binary)
            .arg("curl")
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| format!("failed to run {}: {}", self.binary, e))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{} curl {} exited with {}: {}",
                self.binary,
                path,
                output.status,
                stderr.trim()
            ));
        }
        Ok(output.stdout)
    }

    /// Resolve `app_name` in the targeted space to its GUID.
    #[instrument(skip(self), fields(repo = "cf", operation = "resolve_app_guid"))]
    pub async fn resolve_app_guid(
        &self,
        app_name: &str,
        cf_config: &Path,
    ) -> Result<String, BootstrapError> {
        let contents =
            std::fs::read(cf_config).map_err(|source| BootstrapError::CliConfigRead {
                path: cf_config.to_path_buf(),
                source,
            })?;
        let space_guid =
            wire::decode_space_guid(&contents).map_err(|source| BootstrapError::CliConfigParse {
                path: cf_config.to_path_buf(),
                source,
            })?;
        if space_guid.is_empty() {
            return Err(BootstrapError::NoTargetSpace);
        }

        let body = self
            .curl(&app_search_path(&space_guid, app_name))
            .await
            .map_err(|reason| BootstrapError::Lookup { reason })?;
        let guid = wire::decode_app_search(&body, app_name)?;
        tracing::debug!(app = app_name, guid = %guid, "app resolved");
        Ok(guid)
    }
}

#[async_trait]
impl StatSource for CfCli {
    #[instrument(skip(self), fields(repo = "cf", operation = "fetch_stats"))]
    async fn fetch(&self, app_guid: &str) -> Result<InstanceMap, SampleError> {
        let body = self
            .curl(&format!("/v2/apps/{app_guid}/stats"))
            .await
            .map_err(|reason| SampleError::Fetch { reason })?;
        wire::decode_stats(&body)
    }
}

/// Space-scoped app search by exact name. The name is percent-encoded as one query value.
pub fn app_search_path(space_guid: &str, app_name: &str) -> String {
    format!(
        "/v2/spaces/{}/apps?q=name:{}&inline-relations-depth=1",
        space_guid,
        urlencoding::encode(app_name)
    )
}

/// Location of the cf CLI config: `$CF_HOME/.cf/config.json`, else `$HOME/.cf/config.json`.
pub fn cf_config_path() -> PathBuf {
    let base = std::env::var_os("CF_HOME")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".cf").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_search_path_encodes_spaces() {
        assert_eq!(
            app_search_path("space-1", "my app"),
            "/v2/spaces/space-1/apps?q=name:my%20app&inline-relations-depth=1"
        );
    }

    #[test]
    fn app_search_path_keeps_name_in_one_query_value() {
        let path = app_search_path("space-1", "api&x=1#frag+v2");
        assert_eq!(
            path,
            "/v2/spaces/space-1/apps?q=name:api%26x%3D1%23frag%2Bv2&inline-relations-depth=1"
        );
        assert!(!path.contains('#'));
        assert_eq!(path.matches('&').count(), 1);
    }
}
