//! # Shelfstock CLI
//!
//! Terminal front end for the inventory store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       shelfstock (bin)                      │
//! │                                                             │
//! │   args ──► AppConfig ──► Database ──► seed CSVs ──► Session │
//! │                                                        │    │
//! │              stdin ────────────────────────────────────┤    │
//! │              stdout ◄──────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Diagnostics go to stderr through `tracing` so they never interleave with
//! the menus on stdout.

pub mod config;
pub mod error;
pub mod menu;
pub mod session;

pub use config::{AppConfig, Cli};
pub use error::{AppError, AppResult};
pub use session::Session;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use shelfstock_db::csv::{import_brands, import_products};
use shelfstock_db::{Database, DbConfig};

/// Installs the stderr tracing subscriber.
///
/// Defaults to `warn` so a normal session stays quiet; `RUST_LOG` overrides
/// the filter for debugging.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Opens the store, seeds it from the configured CSV files, and runs the
/// interactive session on stdin/stdout until the operator quits.
pub async fn run(config: AppConfig) -> AppResult<()> {
    info!(store = %config.database_path.display(), "Starting Shelfstock");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    seed_store(&db, &config).await?;

    let input = io::stdin().lock();
    let output = io::stdout().lock();
    let mut session = Session::new(db.clone(), input, output, &config.backup_csv);
    session.run().await?;

    db.close().await;
    Ok(())
}

/// Imports the seed CSVs into the store. A missing file is skipped, so the
/// app starts cleanly in an empty directory.
async fn seed_store(db: &Database, config: &AppConfig) -> AppResult<()> {
    if config.brands_csv.exists() {
        let summary = import_brands(db, &config.brands_csv).await?;
        info!(file = %config.brands_csv.display(), %summary, "Brand seed processed");
    } else {
        info!(file = %config.brands_csv.display(), "Brand seed file not found, skipping");
    }

    if config.inventory_csv.exists() {
        let summary = import_products(db, &config.inventory_csv).await?;
        info!(file = %config.inventory_csv.display(), %summary, "Product seed processed");
    } else {
        info!(file = %config.inventory_csv.display(), "Product seed file not found, skipping");
    }

    let brand_count = db.brands().count().await?;
    let product_count = db.products().count().await?;
    info!(brands = brand_count, products = product_count, "Store ready");

    Ok(())
}
