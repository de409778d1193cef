//! vitals collector daemon.
//!
//! - Loads the YAML config (path from the first argument, `vitals.yaml` otherwise)
//! - Registers the built-in host producers
//! - Runs the collection scheduler and the debug HTTP surface

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use vitals_collector::{app_state, config, producers, registry::MetricRegistry, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "vitals.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .collector
        .listen
        .parse()
        .expect("collector.listen must be a valid SocketAddr");

    let registry = MetricRegistry::new(cfg.collector.capacity(), cfg.collector.poll_interval());
    if cfg.collector.host_metrics {
        producers::register_host_metrics(&registry).expect("host metric registration failed");
    }
    registry.start();

    let state = app_state::AppState::new(cfg, registry.clone());
    let app = router::build_router(state);

    tracing::info!(%listen, "vitals-collector starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");

    registry.stop();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
