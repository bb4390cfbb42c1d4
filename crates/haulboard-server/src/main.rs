mod retention;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use haulboard_api::routes;
use haulboard_api::state::AppStateInner;
use haulboard_db::Database;

use crate::retention::RetentionSweeper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "haulboard=debug,tower_http=debug".into()),
        )
        .init();

    // Config — platform-injected PORT wins over the plain default
    let host = std::env::var("HAULBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("HAULBOARD_PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let db_path: PathBuf = std::env::var("HAULBOARD_DB_PATH")
        .unwrap_or_else(|_| "haulboard.db".into())
        .into();
    let static_dir: PathBuf = std::env::var("HAULBOARD_STATIC_DIR")
        .unwrap_or_else(|_| "./public".into())
        .into();
    let retention_days: u32 = std::env::var("HAULBOARD_RETENTION_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);
    let sweep_interval_hours: u64 = std::env::var("HAULBOARD_SWEEP_INTERVAL_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(24);
    let unique_driver_names = std::env::var("HAULBOARD_UNIQUE_DRIVER_NAMES")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    // Init database
    let db = Arc::new(Database::open(&db_path)?);

    // Shared state
    let state = Arc::new(AppStateInner { db: db.clone(), unique_driver_names });

    // Background retention sweep
    let sweeper = RetentionSweeper::start(
        db,
        Duration::from_secs(sweep_interval_hours * 60 * 60),
        retention_days,
    );

    // API routes, with the static frontend behind them
    let app = Router::new()
        .merge(routes::router(state))
        .fallback_service(ServeDir::new(&static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("haulboard listening on {}", addr);
    info!(
        "Retention: {} days, swept every {} hours",
        retention_days, sweep_interval_hours
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.stop().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
