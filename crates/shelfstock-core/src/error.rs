//! # Error Types
//!
//! Domain-specific error types for shelfstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelfstock-core errors (this file)                                    │
//! │  ├── CoreError        - Domain errors (empty dataset, etc.)            │
//! │  └── ValidationError  - Operator input validation failures             │
//! │                                                                         │
//! │  shelfstock-db errors (separate crate)                                 │
//! │  └── DbError          - Database and CSV operation failures            │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the session loop reports                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → AppError → Operator     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent domain rule violations. They should be caught and
/// translated to user-friendly messages by the session loop.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Statistics were requested over zero products.
    ///
    /// ## When This Occurs
    /// - The analysis report is run before any product exists
    /// - Every product was deleted and the report is run again
    ///
    /// The session loop checks the product count first and shows a notice,
    /// but the engine refuses empty input as well so the contract holds for
    /// any caller.
    #[error("no products in inventory to analyze")]
    EmptyInventory,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Operator input validation errors.
///
/// These errors occur when typed input doesn't meet requirements.
/// The session loop shows the message and re-prompts; none of these is fatal.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., non-numeric price, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A numeric id that doesn't refer to any existing record.
    #[error("{field} {value} does not exist")]
    UnknownId { field: String, value: i64 },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
