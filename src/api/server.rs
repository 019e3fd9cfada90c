//! API server lifecycle: bind, serve until Ctrl+C, drain.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::api::router::api_router;
use crate::api::types::ApiContext;
use crate::config::{AppConfig, ConfigError, APP_NAME};
use crate::pipeline::persona::LlmError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model client error: {0}")]
    Llm(#[from] LlmError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind `0.0.0.0:{port}` and serve the router until the process receives
/// Ctrl+C.
pub async fn serve(config: &AppConfig, ctx: ApiContext) -> Result<(), ServerError> {
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.port);
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    serve_on(listener, config, ctx, shutdown_signal()).await?;
    tracing::info!(%addr, "{APP_NAME} API server stopped");
    Ok(())
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_on<F>(
    listener: TcpListener,
    config: &AppConfig,
    ctx: ApiContext,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let app = api_router(ctx, config);

    tracing::info!(
        %addr,
        frontend_url = %config.frontend_url,
        environment = %config.environment,
        "{APP_NAME} API server running"
    );
    if !config.api_key_configured() {
        tracing::warn!("CLAUDE_API_KEY not set; translation requests will fail with 401");
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        // Without a signal handler, keep serving.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
