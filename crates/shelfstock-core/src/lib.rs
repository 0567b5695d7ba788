//! # shelfstock-core: Pure Business Logic for Shelfstock
//!
//! This crate is the **heart** of Shelfstock. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shelfstock Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal Session (apps/cli)                     │   │
//! │  │    Menu loop ──► Prompts ──► Confirmations ──► Reports         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shelfstock-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  report   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ PriceStats│  │  parsers  │  │   │
//! │  │   │   Brand   │  │ formatting│  │ quartiles │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shelfstock-db (Database Layer)                  │   │
//! │  │           SQLite queries, migrations, repositories, CSV         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Brand, BrandDirectory)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Operator input parsing and validation
//! - [`report`] - The reporting engine: descriptive statistics over prices
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, terminal, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use shelfstock_core::money::Money;
//! use shelfstock_core::validation::parse_price;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(1099); // $10.99
//! assert_eq!(price.to_string(), "$10.99");
//!
//! // Operator input arrives as decimal text, possibly $-prefixed
//! let parsed = parse_price("$10.99").unwrap();
//! assert_eq!(parsed, price);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shelfstock_core::Money` instead of
// `use shelfstock_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use report::{BrandPopularity, InventoryReport, PriceStats};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display label for a product with no brand (NULL brand_id) or a dangling
/// brand reference.
///
/// ## Why a constant?
/// The label appears in listings, product detail views, and the analysis
/// report. Keeping it in one place guarantees the three surfaces agree.
pub const NO_BRAND_LABEL: &str = "None";

/// Date format for human-readable output (e.g. `November 01, 2018`).
///
/// Used everywhere a `date_updated` is shown to the operator. Storage and
/// CSV backups use machine formats instead.
pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";
