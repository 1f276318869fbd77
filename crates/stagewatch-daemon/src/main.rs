//! stagewatchd — watches a staging directory and uploads each newly created
//! file to the configured object-storage bucket under its base name.
//!
//! Configuration is environment-driven; see stagewatch-core. Stops on SIGINT.

use std::sync::Arc;

use anyhow::Context;
use stagewatch_core::Config;
use stagewatch_daemon::{init_tracing, Uploader};
use stagewatch_storage::create_storage;
use stagewatch_watcher::{watch, NotifyEventSource};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;

    let source = NotifyEventSource::new(&config.watch_dir, config.channel_capacity)
        .with_context(|| format!("Failed to watch {}", config.watch_dir.display()))?;

    let uploader = Arc::new(Uploader::new(storage));

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for interrupt signal");
        }
        let _ = shutdown_tx.send(()).await;
    });

    watch::run(
        &config.watch_dir,
        source,
        uploader,
        config.failure_policy,
        shutdown_rx,
    )
    .await
}
