mod config;

use std::sync::Arc;

use anyhow::Context;
use flowdeploy_api::{HttpApi, PipelineApiAdapter};
use flowdeploy_core::DeployPipeline;
use flowdeploy_metadata::SoapMetadataClient;
use flowdeploy_observe::logger_init;
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env().context("invalid configuration")?;
    logger_init(&config.logger)?;
    info!(
        bind = %config.bind,
        scratch = %config.pipeline.scratch_root.display(),
        api_version = %config.pipeline.api_version,
        "starting flowdeployd"
    );

    let client =
        SoapMetadataClient::new(config.metadata).context("failed to build metadata client")?;
    let pipeline = Arc::new(DeployPipeline::with_system_clock(
        config.pipeline,
        Arc::new(client),
    ));

    let shutdown = CancellationToken::new();
    let adapter = Arc::new(PipelineApiAdapter::new(pipeline, shutdown.clone()));
    let router = HttpApi::new(adapter, config.api_key).router();

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "listening");

    flowdeploy_api::axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("http server failed")?;

    info!("flowdeployd stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM and cancels in-flight deployments.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
    shutdown.cancel();
}
