use portfolio_site::{router, AppConfig, AppState};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    if config.strava.is_none() {
        info!("strava credentials not configured, serving data file hours only");
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!("portfolio_site/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let state = AppState::new(&config, client);
    let app = router(state, &config.asset_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(data = %config.data_path.display(), "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
