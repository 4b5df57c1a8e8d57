use crate::config::AppConfig;
use crate::users::UsersFile;
use anyhow::Result;
use firegate_auth::firebase::FirebaseApp;
use firegate_core::InMemoryUserStore;
use firegate_server::{CookieConfig, SecurityConfig, ServerConfig, create_app};
use firegate_session::InMemorySessionService;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const PURGE_INTERVAL: Duration = Duration::from_secs(600);

/// Assemble the server from configuration.
pub async fn build_server_config(
    config: &AppConfig,
    users_file: Option<&Path>,
) -> Result<ServerConfig> {
    config.validate()?;
    let firebase_app = FirebaseApp::initialize(&config.firebase)?;
    if let Some(app) = &firebase_app {
        tracing::info!(project_id = %app.project_id(), "firebase token login enabled");
    }

    let user_store = Arc::new(InMemoryUserStore::new());
    if let Some(path) = users_file {
        let created = UsersFile::load(path)?.seed(user_store.as_ref()).await?;
        tracing::info!(count = created, path = %path.display(), "loaded users");
    }

    let session_service = Arc::new(InMemorySessionService::with_ttl(chrono::Duration::seconds(
        config.server.session_ttl_secs,
    )));
    spawn_session_purge(session_service.clone());

    let cookie = CookieConfig { secure: config.server.secure_cookies, ..Default::default() };
    let security = SecurityConfig {
        allowed_origins: config.server.allowed_origins.clone(),
        max_body_size: config.server.max_body_size,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    };

    Ok(ServerConfig::new(
        config.firebase.clone(),
        firebase_app.map(|app| app.verifier()),
        user_store,
        session_service,
    )?
    .with_cookie_config(cookie)
    .with_security(security))
}

fn spawn_session_purge(sessions: Arc<InMemorySessionService>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!(count = purged, "purged expired sessions");
            }
        }
    });
}

pub async fn run_serve(config: AppConfig, users_file: Option<&Path>) -> Result<()> {
    let server_config = build_server_config(&config, users_file).await?;
    let app = create_app(server_config)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, "firegate listening");
    println!("firegate starting on http://{}", addr);
    println!("Press Ctrl+C to stop");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
