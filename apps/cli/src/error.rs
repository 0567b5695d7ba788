//! Error types for the terminal app.

use shelfstock_core::CoreError;
use shelfstock_db::DbError;

/// Application errors.
///
/// Validation problems never surface here; the session prints those and
/// re-prompts. What does arrive is fatal to the current operation: store
/// failures, broken pipes, unusable configuration.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Inventory error: {0}")]
    Core(#[from] CoreError),

    #[error("Store error: {0}")]
    Db(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias for application results.
pub type AppResult<T> = Result<T, AppError>;
