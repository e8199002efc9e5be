use anyhow::Context;
use promptreel_server::config::ServerConfig;
use promptreel_server::routes::{build_router, build_state};
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cfg = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = cfg.port,
        model = %cfg.model,
        poll_interval_secs = cfg.poll_interval.as_secs(),
        max_poll_checks = ?cfg.max_poll_checks,
        api_key_len = cfg.api_key.len(),
        "starting promptreel proxy"
    );

    let router = build_router(build_state(&cfg));

    let addr: SocketAddr = format!("0.0.0.0:{}", cfg.port)
        .parse()
        .context("parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, router).await.context("serve http")?;
    Ok(())
}
