// Background sampler: one stat fetch per tick, one history push per good fetch.
// Failed ticks are logged and skipped; the window keeps serving the last good data.

use crate::error::SampleError;
use crate::history::HistoryBuffer;
use crate::models::GroupedSample;
use crate::stat_source::StatSource;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::{Duration, Instant, interval_at, timeout};
use tracing::Instrument;

/// Source, destination and shutdown for the sampler.
pub struct SamplerDeps {
    pub source: Arc<dyn StatSource>,
    pub history: Arc<HistoryBuffer>,
    /// Resolved once at startup; never changes.
    pub app_guid: String,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct SamplerConfig {
    pub sample_interval: Duration,
    pub fetch_timeout: Duration,
    /// How often to log sampler counters (real time).
    pub stats_log_interval: Duration,
}

/// Counters returned when the sampler exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerStats {
    pub ticks_ok: u64,
    pub ticks_failed: u64,
}

/// Fetch once and group by the reference instance, bounded by `fetch_timeout`.
pub async fn sample_once(
    source: &dyn StatSource,
    app_guid: &str,
    fetch_timeout: Duration,
) -> Result<GroupedSample, SampleError> {
    let instances = timeout(fetch_timeout, source.fetch(app_guid))
        .await
        .map_err(|_| SampleError::Timeout(fetch_timeout))??;
    GroupedSample::from_instances(instances)
}

/// Retries [`sample_once`] every `retry_interval` until one succeeds. `None` if
/// `shutdown` resolves first.
pub async fn first_sample(
    source: &dyn StatSource,
    app_guid: &str,
    fetch_timeout: Duration,
    retry_interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> Option<GroupedSample> {
    let attempts = async {
        loop {
            match sample_once(source, app_guid, fetch_timeout).await {
                Ok(sample) => return sample,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        kind = e.kind(),
                        operation = "first_sample",
                        "initial sample failed; retrying"
                    );
                    tokio::time::sleep(retry_interval).await;
                }
            }
        }
    };
    tokio::select! {
        sample = attempts => Some(sample),
        _ = shutdown => None,
    }
}

/// Spawns the sampling loop. The first tick fires one interval after spawn, since
/// startup has already seeded the window. Sending on (or dropping) the shutdown
/// sender stops the loop and abandons any fetch in flight.
pub fn spawn(deps: SamplerDeps, config: SamplerConfig) -> tokio::task::JoinHandle<SamplerStats> {
    let SamplerDeps {
        source,
        history,
        app_guid,
        mut shutdown_rx,
    } = deps;
    let SamplerConfig {
        sample_interval,
        fetch_timeout,
        stats_log_interval,
    } = config;

    let sample_interval_ms = sample_interval.as_millis() as u64;
    let span = tracing::span!(
        tracing::Level::DEBUG,
        "sampler",
        app_guid = %app_guid,
        sample_interval_ms
    );

    tokio::spawn(
        async move {
            let mut tick = interval_at(Instant::now() + sample_interval, sample_interval);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut stats_log_tick =
                interval_at(Instant::now() + stats_log_interval, stats_log_interval);
            stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            let mut stats = SamplerStats::default();

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Sampler shutting down");
                        break;
                    }
                    _ = stats_log_tick.tick() => {
                        tracing::info!(
                            ticks_ok = stats.ticks_ok,
                            ticks_failed = stats.ticks_failed,
                            newest = %crate::flatten::render_time(&history.newest().timestamp),
                            "sampler stats"
                        );
                        continue;
                    }
                    _ = tick.tick() => {}
                }

                let result = tokio::select! {
                    r = sample_once(source.as_ref(), &app_guid, fetch_timeout) => r,
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Sampler shutting down; fetch abandoned");
                        break;
                    }
                };

                match result {
                    Ok(sample) => {
                        tracing::debug!(
                            operation = "push",
                            instances = sample.instances.len(),
                            "sample recorded"
                        );
                        history.push(sample);
                        stats.ticks_ok += 1;
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            kind = e.kind(),
                            operation = "sample",
                            "tick skipped"
                        );
                        stats.ticks_failed += 1;
                    }
                }
            }
            stats
        }
        .instrument(span),
    )
}

