//! StatusLens: status report analysis server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use statuslens_core::StatusLensConfig;
use statuslens_server::{build_router, AppState};

fn resolve_data_dir() -> PathBuf {
    std::env::var("STATUSLENS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = StatusLensConfig::from_env(&data_dir)?;
    let port = config.port;

    let state = Arc::new(
        AppState::open(config).map_err(|e| anyhow::anyhow!("Failed to initialize state: {}", e))?,
    );
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("StatusLens server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
