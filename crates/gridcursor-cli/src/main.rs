#![doc = include_str!("../README.md")]

mod config;
mod drain;
mod telemetry;

use std::time::Instant;

use clap::Parser;
use config::{CliArgs, RunConfig, Strategy};
use drain::{Summary, drain_stream, drain_threads};
use telemetry::init_telemetry;
use tokio::signal;
use tokio_util::sync::CancellationToken;

// Worker threads allocate per delivered line; mimalloc holds up better under
// that contention than the system allocator.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = RunConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let started = Instant::now();
    let summary = match config.strategy {
        Strategy::Lock => {
            let cursor = config.options.lock_cursor()?;
            let config = config.clone();
            tokio::task::spawn_blocking(move || drain_threads(&cursor, &config)).await??
        }
        Strategy::Atomic => {
            let cursor = config.options.atomic_cursor()?;
            let config = config.clone();
            tokio::task::spawn_blocking(move || drain_threads(&cursor, &config)).await??
        }
        Strategy::Stream => {
            let shutdown = CancellationToken::new();
            let signal_task = tokio::spawn(shutdown_signal(shutdown.clone()));
            let summary = drain_stream(&config, &shutdown).await;
            signal_task.abort();
            summary?
        }
    };

    log_summary(&config, &summary, started);
    Ok(())
}

fn log_startup_info(config: &RunConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Draining grid with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Draining {:?} with {:?} strategy and {} workers",
            config.options.dimensions(),
            config.strategy,
            config.workers
        );
    }
}

fn log_summary(config: &RunConfig, summary: &Summary, started: Instant) {
    for (worker, received) in summary.per_worker.iter().enumerate() {
        tracing::debug!(worker, received, "worker total");
    }
    tracing::info!(
        delivered = summary.delivered(),
        workers = config.workers,
        elapsed_ms = started.elapsed().as_millis(),
        "grid drained"
    );
}

/// Cancels `token` on Ctrl+C or SIGTERM.
async fn shutdown_signal(token: CancellationToken) {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }

    tracing::info!("Shutdown signal received, cancelling stream...");
    token.cancel();
}
