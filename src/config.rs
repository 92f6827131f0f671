use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::BootstrapError;
use crate::history::BackfillMode;

/// Used when no path is given and this file exists in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Upper bound for the sampling interval, fetch timeout and stats log interval (one day).
pub const MAX_SAMPLING_SECS: u64 = 86_400;

/// Upper bound for the window length (`chart_span_secs / interval_secs`).
pub const MAX_CAPACITY: u64 = 100_000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sampling: SamplingConfig,
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Seconds between stat fetches.
    pub interval_secs: u64,
    /// Seconds of history kept; must be a multiple of `interval_secs`.
    pub chart_span_secs: u64,
    /// Upper bound on one stat fetch.
    pub fetch_timeout_secs: u64,
    /// Zero the usage values of backfilled (synthetic) entries instead of repeating the first sample.
    pub zero_backfill: bool,
    /// How often to log sampler counters at INFO level.
    pub stats_log_interval_secs: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3,
            chart_span_secs: 300,
            fetch_timeout_secs: 10,
            zero_backfill: false,
            stats_log_interval_secs: 60,
        }
    }
}

impl SamplingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Sample interval as a chrono delta, for backdating. `None` if out of range.
    pub fn interval_delta(&self) -> Option<chrono::TimeDelta> {
        chrono::TimeDelta::try_seconds(i64::try_from(self.interval_secs).ok()?)
    }

    /// Window length: chart span / sample interval. `None` when zero or unrepresentable.
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        let n = self.chart_span_secs.checked_div(self.interval_secs)?;
        NonZeroUsize::new(usize::try_from(n).ok()?)
    }

    pub fn backfill_mode(&self) -> BackfillMode {
        BackfillMode::from_zero_flag(self.zero_backfill)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// cf CLI executable (name on PATH or absolute path).
    pub cf_binary: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            cf_binary: "cf".into(),
        }
    }
}

impl AppConfig {
    /// Load from `path` if given; otherwise `config.toml` if present; otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, BootstrapError> {
        match path {
            Some(p) => Self::load_file(p),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_file(path: &Path) -> Result<Self, BootstrapError> {
        let s = std::fs::read_to_string(path).map_err(|source| BootstrapError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&s).map_err(|e| BootstrapError::ConfigInvalid {
            path: PathBuf::from(path),
            reason: e.to_string(),
        })
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        let sampling = &self.sampling;
        for (key, value) in [
            ("sampling.interval_secs", sampling.interval_secs),
            ("sampling.fetch_timeout_secs", sampling.fetch_timeout_secs),
            ("sampling.stats_log_interval_secs", sampling.stats_log_interval_secs),
        ] {
            anyhow::ensure!(
                (1..=MAX_SAMPLING_SECS).contains(&value),
                "{key} must be between 1 and {MAX_SAMPLING_SECS}, got {value}"
            );
        }
        anyhow::ensure!(
            sampling.chart_span_secs > 0,
            "sampling.chart_span_secs must be > 0, got {}",
            sampling.chart_span_secs
        );
        anyhow::ensure!(
            sampling.chart_span_secs % sampling.interval_secs == 0,
            "sampling.chart_span_secs ({}) must be a multiple of sampling.interval_secs ({})",
            sampling.chart_span_secs,
            sampling.interval_secs
        );
        let capacity = sampling.chart_span_secs / sampling.interval_secs;
        anyhow::ensure!(
            capacity <= MAX_CAPACITY,
            "sampling.chart_span_secs / sampling.interval_secs must be at most {MAX_CAPACITY}, got {capacity}"
        );
        anyhow::ensure!(
            !self.platform.cf_binary.is_empty(),
            "platform.cf_binary must be non-empty"
        );
        Ok(())
    }
}
