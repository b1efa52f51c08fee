//! meter-ingest - Meter readings upload service
//!
//! Accepts CSV uploads of meter readings over HTTP, validates each row
//! against the known accounts and stores the accepted readings.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};

use meter_common::config::{
    config_file_path, load_toml_config, resolve_root_folder, RootFolderInitializer,
};
use meter_common::db::init_database;
use meter_ingest::services::seed_accounts;
use meter_ingest::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "meter-ingest", version, about = "Meter readings CSV upload service")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "METER_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder for the database and temporary uploads
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "METER_PORT")]
    port: Option<u16>,

    /// CSV file used to seed an empty accounts table
    #[arg(long, env = "METER_ACCOUNTS_SEED")]
    accounts_seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Read before tracing starts so the configured level applies
    let config = load_toml_config(args.config.as_deref())?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    match &config.logging.file {
        Some(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    info!(
        "Starting meter-ingest v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // load_toml_config ran without a subscriber, so report its outcome here
    match config_file_path(args.config.as_deref()) {
        Some(path) if path.exists() => info!("Loaded configuration from {}", path.display()),
        Some(path) => warn!(
            "Config file not found at {}, using default configuration",
            path.display()
        ),
        None => warn!("Could not determine config directory, using default configuration"),
    }

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;
    info!("Root folder: {}", initializer.root_folder().display());

    let db_path = initializer.database_path();
    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    info!("Database connection established");

    match args.accounts_seed.or(config.accounts_seed_file.clone()) {
        Some(seed_file) => {
            seed_accounts(&pool, &seed_file)
                .await
                .with_context(|| format!("Failed to seed accounts from {}", seed_file.display()))?;
        }
        None => info!("No accounts seed file configured"),
    }

    let state = AppState::new(pool, initializer.upload_folder(), config.max_upload_bytes);
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let address = format!("{}:{}", config.bind_address, port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("meter-ingest listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
