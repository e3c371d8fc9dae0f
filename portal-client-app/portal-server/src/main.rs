use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info};

use portal_api::{build_router, AppState, SessionRegistry};
use portal_core::repositories::LocalStore;
use portal_core::services::{AccessPolicy, AuthService, MenuStoreSettings, UserService};
use portal_infrastructure::{
    BackendClient, FileStore, HttpAuthRepository, HttpMenuRepository, HttpUserRepository, MemoryStore,
};
use portal_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = portal_shared::telemetry::init_telemetry(&config.telemetry)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Backend adapters
    let backend = BackendClient::new(&config.backend).context("failed to build backend client")?;
    info!("Using backend at {}", config.backend.base_url);

    let menu_repo = Arc::new(HttpMenuRepository::new(backend.clone()));
    let auth_repo = Arc::new(HttpAuthRepository::new(backend.clone()));
    let user_repo = Arc::new(HttpUserRepository::new(backend));

    // Local store for persisted menu state; empty path keeps it in memory
    let storage: Arc<dyn LocalStore> = if config.storage.path.is_empty() {
        info!("Using in-memory local store");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(Path::new(&config.storage.path)))
    };

    let menu_settings = MenuStoreSettings {
        storage_key: config.menu.storage_key.clone(),
        cache_ttl: chrono::Duration::minutes(config.menu.cache_ttl_minutes),
        dashboard_route: config.menu.dashboard_route.clone(),
    };
    let policy = AccessPolicy {
        allow_list: config.menu.allow_list.clone(),
        redirect_route: config.menu.dashboard_route.clone(),
    };

    let auth = AuthService::new(auth_repo, menu_repo, storage, menu_settings, policy);
    let users = UserService::new(user_repo);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let sweep_every = Duration::from_secs(config.session.sweep_interval_seconds.max(1));
    let state = AppState::new(config, auth, users);
    tokio::spawn(sweep_idle_sessions(state.sessions.clone(), sweep_every));

    let app = build_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

/// Drops sessions whose browser went away without logging out.
async fn sweep_idle_sessions(sessions: Arc<SessionRegistry>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        sessions.evict_idle(chrono::Utc::now());
    }
}
