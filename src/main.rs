use anyhow::{Context, Result};
use appstats::*;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    match run(cli::Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Cli) -> Result<()> {
    let mut app_config = config::AppConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    let sampling = &app_config.sampling;
    let capacity = sampling
        .capacity()
        .context("sampling.chart_span_secs / sampling.interval_secs must be non-zero")?;
    let interval_delta = sampling
        .interval_delta()
        .context("sampling.interval_secs is out of range")?;

    let cf = Arc::new(stat_source::CfCli::new(app_config.platform.cf_binary.clone()));
    let app_guid = cf
        .resolve_app_guid(&args.app_name, &stat_source::cf_config_path())
        .await?;
    tracing::info!(app = %args.app_name, guid = %app_guid, "app resolved");

    let initial = sampler::first_sample(
        cf.as_ref(),
        &app_guid,
        sampling.fetch_timeout(),
        sampling.interval(),
        shutdown_signal(),
    )
    .await;
    let Some(initial) = initial else {
        tracing::info!("Received shutdown signal before first sample");
        return Ok(());
    };
    let history = Arc::new(history::HistoryBuffer::backfill(
        &initial,
        capacity,
        interval_delta,
        sampling.backfill_mode(),
    ));

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let sampler_handle = sampler::spawn(
        sampler::SamplerDeps {
            source: cf.clone(),
            history: history.clone(),
            app_guid: app_guid.clone(),
            shutdown_rx,
        },
        sampler::SamplerConfig {
            sample_interval: sampling.interval(),
            fetch_timeout: sampling.fetch_timeout(),
            stats_log_interval: std::time::Duration::from_secs(sampling.stats_log_interval_secs),
        },
    );

    let app = routes::app(
        history,
        routes::AppIdentity {
            name: args.app_name.clone(),
            guid: app_guid,
        },
        sampling.interval_secs,
    );
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "HTTP server listening at http://localhost:{}",
        app_config.server.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    match sampler_handle.await {
        Ok(stats) => tracing::info!(
            ticks_ok = stats.ticks_ok,
            ticks_failed = stats.ticks_failed,
            "sampler stopped"
        ),
        Err(e) => tracing::warn!(error = %e, "sampler task failed"),
    }
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
