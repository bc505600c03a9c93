use anyhow::Context;

use editrelay_api::RelayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    editrelay_observability::init();

    let config = RelayConfig::from_env();
    let app = editrelay_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        max_commands = config.max_commands,
        max_payload_bytes = config.max_payload_bytes,
        script_path = %config.script_path.display(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
