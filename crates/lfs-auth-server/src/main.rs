use lfs_auth_server::{config::load_config, router, state::AppState};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = load_config()?;
    let state = Arc::new(AppState::init(&cfg));

    let server = &state.cfg.server;
    tracing::info!(
        bind = %server.bind,
        database = %server.database_path.display(),
        workers = state.validators.size(),
        "git-lfs-authenticate server listening"
    );

    let listener = tokio::net::TcpListener::bind(&server.bind).await?;
    let app = router(state.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
