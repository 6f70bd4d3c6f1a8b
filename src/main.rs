//! # Cookie Canary Server
//!
//! Main entry point: loads configuration, installs tracing, builds the
//! session store and serves the canary router until shutdown.

use std::net::AddrParseError;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cookie_canary::adapters::http::{app_router, CanaryAppState, CookiePolicy};
use cookie_canary::adapters::session_store::{InMemorySessionStore, RedisSessionStore};
use cookie_canary::config::{AppConfig, ConfigError, ServerConfig, StoreBackend, ValidationError};
use cookie_canary::ports::{SessionStore, SessionStoreError};

/// Errors that abort startup.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session store: {0}")]
    Store(#[from] SessionStoreError),

    #[error("Invalid bind address: {0}")]
    Addr(#[from] AddrParseError),

    #[error("Server I/O: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        store = ?config.session.store,
        "Cookie canary starting"
    );

    let canary = config.canary.canary_value();
    if canary.is_none() {
        tracing::warn!("CANARY_VALUE is not set; canary requests will fail with 500");
    }

    let keys = Arc::new(config.key_material()?);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let store = build_store(&config, shutdown_rx).await?;

    let cookie_policy = CookiePolicy {
        session_cookie_name: config.session.cookie_name.clone(),
        session_max_age_secs: config.session.ttl_secs,
        secure: config.secure_cookies(),
    };
    let state = CanaryAppState::new(store, keys, canary)
        .with_cookie_policy(cookie_policy)
        .with_response_body(config.canary.response_body)
        .with_version(&config.canary.version);
    let app = app_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_store(
    config: &AppConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<Arc<dyn SessionStore>, StartupError> {
    let ttl = config.session.ttl();

    match config.session.store {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory session store");
            let store = InMemorySessionStore::new(ttl);
            let sweeper = store.clone();
            let period = config.session.purge_interval();
            tokio::spawn(async move { sweeper.run_purge_loop(period, shutdown).await });
            Ok(Arc::new(store))
        }
        StoreBackend::Redis => {
            let connect = RedisSessionStore::connect(&config.redis.url, ttl);
            let store = tokio::time::timeout(config.redis.connect_timeout(), connect)
                .await
                .map_err(|_| SessionStoreError::Unavailable("Redis connect timed out".into()))??
                .with_key_prefix(config.redis.key_prefix.as_str());
            tracing::info!("Connected to Redis session store");
            Ok(Arc::new(store))
        }
    }
}

/// Waits for a shutdown signal.
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
