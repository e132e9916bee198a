use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use pointtable_server::config::AppConfig;
use pointtable_server::state::AppState;
use pointtable_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    info!("Connecting to database...");
    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;

    seed::seed_role_permissions(&db)
        .await
        .context("Failed to seed roles")?;
    if let Some(ref admin) = config.auth.admin {
        seed::seed_admin_user(&db, admin)
            .await
            .context("Failed to seed administrator")?;
    }
    seed::ensure_indexes(&db)
        .await
        .context("Failed to create indexes")?;

    let address = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState { db, config });

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
