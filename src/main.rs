//! Shift report HTTP server.
//!
//! Reads configuration from the directory in `SHIFT_REPORT_CONFIG`
//! (default `./config/default`), seeds the catalog from `catalog.yaml` when
//! present, and serves the API.

use std::path::PathBuf;
use std::sync::Arc;

use shift_report::api::{AppState, create_router};
use shift_report::config::ConfigLoader;
use shift_report::error::ReportError;
use shift_report::logging;
use shift_report::report::ReportService;
use shift_report::storage::{SqliteStore, seed_catalog};
use tracing::{error, info};

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(err) = run().await {
        error!(error = %err, "Server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = PathBuf::from(
        std::env::var("SHIFT_REPORT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string()),
    );
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir.display(),
        reference_shift_hours = %config.calculation().reference_shift_hours,
        a3_norm_source = ?config.calculation().a3_norm_source,
        "Configuration loaded"
    );

    let store = SqliteStore::open(&config.storage().database_path)?;
    match ConfigLoader::load_catalog_seed(config_dir.join("catalog.yaml")) {
        Ok(seed) => seed_catalog(&store, &seed)?,
        Err(ReportError::ConfigNotFound { path }) => {
            info!(path = %path, "No catalog seed, using stored catalog");
        }
        Err(err) => return Err(err.into()),
    }

    let service = ReportService::new(Arc::new(store), *config.calculation());
    let router = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&config.server().bind_address).await?;
    info!(address = %config.server().bind_address, "Listening");
    axum::serve(listener, router).await?;
    Ok(())
}
