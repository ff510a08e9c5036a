use mimalloc::MiMalloc;
use solvesync::config::CONFIG;
use solvesync::github::GithubContents;
use solvesync::server::{BridgeState, bridge_router};
use solvesync::sync::{ResultReporter, SharedConfigStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &*CONFIG;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let target = cfg.github.target();
    let bridge_key = if cfg.basic.bridge_key.is_empty() {
        "<open>"
    } else {
        "<set>"
    };
    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        bridge_key,
        ?target,
        "solvesync starting"
    );
    if !target.is_configured() {
        warn!("GitHub destination is incomplete; syncs will fail until PUT /config/target");
    }

    let store = Arc::new(GithubContents::from_config(&cfg.github)?);
    let reporter = match &cfg.basic.status_file {
        Some(path) => ResultReporter::with_status_file(path.clone()).await,
        None => ResultReporter::new(),
    };
    let state = BridgeState::new(
        store,
        Arc::new(SharedConfigStore::new(target)),
        reporter,
        cfg.source.clone(),
        Arc::from(cfg.basic.bridge_key.as_str()),
    );
    let app = bridge_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("Bridge listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
