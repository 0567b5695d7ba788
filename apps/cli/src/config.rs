//! # App Configuration
//!
//! Command-line arguments and store-path resolution.
//!
//! ## Store Path Resolution Order
//! 1. `--db PATH` on the command line
//! 2. `SHELFSTOCK_DB_PATH` environment variable
//! 3. Platform data directory (created on demand) joined with `inventory.db`
//!
//! The CSV paths are relative to the working directory by default, matching
//! the convention of dropping seed files next to where the app is launched.

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Command-line arguments for the `shelfstock` binary.
#[derive(Debug, Parser)]
#[command(name = "shelfstock", version, about = "Store inventory management in the terminal")]
pub struct Cli {
    /// Path to the SQLite store file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Brand seed CSV imported at startup when present
    #[arg(long, value_name = "FILE", default_value = "brands.csv")]
    pub brands: PathBuf,

    /// Product seed CSV imported at startup when present
    #[arg(long, value_name = "FILE", default_value = "inventory.csv")]
    pub inventory: PathBuf,

    /// Destination for the backup CSV
    #[arg(long, value_name = "FILE", default_value = "inventory-backup.csv")]
    pub backup: PathBuf,
}

/// Fully resolved paths the app runs with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite store file.
    pub database_path: PathBuf,
    /// Brand seed CSV, skipped when absent.
    pub brands_csv: PathBuf,
    /// Product seed CSV, skipped when absent.
    pub inventory_csv: PathBuf,
    /// Backup CSV destination.
    pub backup_csv: PathBuf,
}

impl AppConfig {
    /// Resolves the configuration from parsed arguments and the environment.
    pub fn from_cli(cli: Cli) -> AppResult<Self> {
        let database_path = match cli.db {
            Some(path) => path,
            None => default_database_path()?,
        };

        Ok(AppConfig {
            database_path,
            brands_csv: cli.brands,
            inventory_csv: cli.inventory,
            backup_csv: cli.backup,
        })
    }
}

/// Store location when `--db` is not given.
fn default_database_path() -> AppResult<PathBuf> {
    if let Ok(path) = std::env::var("SHELFSTOCK_DB_PATH") {
        debug!(path = %path, "Using store path from SHELFSTOCK_DB_PATH");
        return Ok(PathBuf::from(path));
    }

    let dirs = directories::ProjectDirs::from("com", "shelfstock", "shelfstock")
        .ok_or_else(|| {
            AppError::Config("could not determine a data directory for the store".to_string())
        })?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    let path = data_dir.join("inventory.db");
    debug!(path = %path.display(), "Using store path in the platform data directory");
    Ok(path)
}

// =============================================================================
// Tests
// =============================================================================
