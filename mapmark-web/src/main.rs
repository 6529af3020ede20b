//! MapMark web service - main entry point
//!
//! Single binary serving the embedded browser UI and the marker REST API
//! backed by a SQLite store under the root data folder.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mapmark_common::config::{self, MapProviderConfig};
use mapmark_common::db;
use mapmark_web::{build_router, AppState};

/// Command-line arguments for mapmark-web
#[derive(Parser, Debug)]
#[command(name = "mapmark-web")]
#[command(about = "Map-annotation web service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "MAPMARK_PORT")]
    port: u16,

    /// Root folder holding the marker database
    #[arg(short, long, env = "MAPMARK_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// AMap JavaScript API key
    #[arg(long, default_value = "", env = "AMAP_KEY")]
    amap_key: String,

    /// AMap security code paired with the key
    #[arg(long, default_value = "", env = "AMAP_SECURITY_CODE")]
    amap_security_code: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapmark_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting MapMark v{}", env!("CARGO_PKG_VERSION"));

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    if args.amap_key.is_empty() {
        info!("No AMAP_KEY configured; the map pane will not load tiles");
    }

    let state = AppState::new(
        pool,
        MapProviderConfig {
            api_key: args.amap_key,
            security_code: args.amap_security_code,
        },
    );
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("mapmark-web listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
