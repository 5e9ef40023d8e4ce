//! pantry-server - PantryPal recipe discovery and community wall
//!
//! Serves the JSON API over one SQLite database and a local uploads folder,
//! both kept under the resolved root folder.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pantry_common::config::{config_file_path, resolve_root_folder, PantryConfig, RootFolderInitializer};
use pantry_common::db::init_database;
use pantry_common::recipes::RecipeCatalog;
use pantry_server::storage::ImageStore;
use pantry_server::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default listen port
const DEFAULT_PORT: u16 = 5780;

/// Command-line arguments for pantry-server
#[derive(Parser, Debug)]
#[command(name = "pantry-server")]
#[command(about = "Recipe discovery and community wall API for PantryPal")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "PANTRY_PORT")]
    port: Option<u16>,

    /// Root folder holding pantry.db and uploads/
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Recipe catalog JSON file (defaults to the bundled catalog)
    #[arg(short, long, env = "PANTRY_CATALOG")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = PantryConfig::load_or_default();

    // RUST_LOG wins, then log_level from the config file
    let default_filter = config
        .log_level
        .as_deref()
        .map(|level| format!("pantry_server={level},pantry_common={level},tower_http={level}"))
        .unwrap_or_else(|| "pantry_server=info,pantry_common=info,tower_http=info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting PantryPal server (pantry-server) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match config_file_path() {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .with_context(|| format!("Failed to create root folder {}", initializer.root_folder().display()))?;
    info!("Root folder: {}", initializer.root_folder().display());

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let catalog_path = args.catalog.or(config.catalog_path);
    let catalog = match &catalog_path {
        Some(path) => RecipeCatalog::load(path)
            .with_context(|| format!("Failed to load recipe catalog {}", path.display()))?,
        None => RecipeCatalog::builtin().context("Bundled recipe catalog is invalid")?,
    };
    info!(
        "Loaded {} recipes from {}",
        catalog.len(),
        catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled catalog".to_string())
    );

    let images = ImageStore::new(initializer.uploads_path());
    info!("Uploads folder: {}", images.dir().display());

    let app = build_router(AppState::new(pool, catalog, images));

    let port = args.port.or(config.port).unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("pantry-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

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
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
