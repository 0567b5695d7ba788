//! # Validation Module
//!
//! Operator input parsing for Shelfstock.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Session Loop (apps/cli)                                      │
//! │  ├── Prompts, shows the error message, re-prompts                      │
//! │  └── Retry-until-valid is the caller's policy, not ours                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Raw text → typed value, or a typed error                          │
//! │  └── Pure functions, no prompting, no I/O                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL and CHECK constraints                                    │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelfstock_core::validation::{parse_price, parse_quantity};
//!
//! // Prices arrive as decimal text, optionally $-prefixed
//! assert_eq!(parse_price("$12.99").unwrap().cents(), 1299);
//!
//! // Quantities are whole numbers
//! assert_eq!(parse_quantity("24").unwrap(), 24);
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// Price
// =============================================================================

/// Parses an operator-typed price into [`Money`].
///
/// ## Rules
/// - Leading/trailing whitespace is ignored; leading `$` signs are stripped
/// - The remainder must parse as a finite decimal number
/// - The value is converted to cents by rounding `value * 100` (never
///   truncating; `int(10.99 * 100)` losing a cent is exactly the bug this
///   avoids)
/// - Negative prices are rejected
///
/// ## Example
/// ```rust
/// use shelfstock_core::validation::parse_price;
///
/// assert_eq!(parse_price("12.99").unwrap().cents(), 1299);
/// assert_eq!(parse_price("$5").unwrap().cents(), 500);
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let cleaned = text.trim().trim_start_matches('$');

    let value: f64 = cleaned
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a decimal number such as 5.99".to_string(),
        })?;

    // f64 parsing accepts "inf" and "NaN"; neither is a price.
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    let cents = (value * 100.0).round();
    if !(0.0..=i64::MAX as f64).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(Money::from_cents(cents as i64))
}

// =============================================================================
// Quantity
// =============================================================================

/// Parses an operator-typed quantity.
///
/// ## Rules
/// - Must be a whole number (no decimals)
/// - Must be non-negative; zero is allowed (out-of-stock items stay listed)
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let qty: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        })?;

    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(qty)
}

// =============================================================================
// Date
// =============================================================================

/// Parses an operator-typed date in `month/day/year` form into midnight UTC.
///
/// ## Rules
/// - Exactly three `/`-separated numeric components, each individually
///   trimmed (so `11 / 1 / 2018` is accepted)
/// - Year must be 1 through 9999
/// - Month and day must name a real calendar date
///
/// ## Example
/// ```rust
/// use shelfstock_core::validation::parse_date;
///
/// let date = parse_date("11/1/2018").unwrap();
/// assert_eq!(date.format("%Y-%m-%d %H:%M").to_string(), "2018-11-01 00:00");
/// assert!(parse_date("2/30/2021").is_err());
/// ```
pub fn parse_date(text: &str) -> ValidationResult<DateTime<Utc>> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return Err(ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "expected month/day/year".to_string(),
        });
    }

    let numeric_part = |part: &str| {
        part.trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: "expected numeric month/day/year".to_string(),
            })
    };
    let month = numeric_part(parts[0])?;
    let day = numeric_part(parts[1])?;
    let year = numeric_part(parts[2])?;

    if !(1..=9999).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: 1,
            max: 9999,
        });
    }

    let date = u32::try_from(month)
        .ok()
        .zip(u32::try_from(day).ok())
        .and_then(|(m, d)| NaiveDate::from_ymd_opt(year as i32, m, d))
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "no such calendar date".to_string(),
        })?;

    // Operator-entered dates carry no time of day; midnight UTC keeps the
    // ordering stable against timestamps the store writes itself.
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "no such calendar date".to_string(),
        })?;

    Ok(midnight.and_utc())
}

// =============================================================================
// Record IDs
// =============================================================================

/// Parses an operator-typed record id and checks it against the ids that
/// currently exist.
///
/// ## Rules
/// - Must be a whole number
/// - Must be a member of `valid_ids` (the caller fetches the live id set)
pub fn parse_id(text: &str, valid_ids: &BTreeSet<i64>) -> ValidationResult<i64> {
    let id: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "ID".to_string(),
            reason: "must be a number".to_string(),
        })?;

    if !valid_ids.contains(&id) {
        return Err(ValidationError::UnknownId {
            field: "ID".to_string(),
            value: id,
        });
    }

    Ok(id)
}

// =============================================================================
// Product Name
// =============================================================================

/// Validates and normalizes an operator-typed product name.
///
/// ## Rules
/// - Trimmed; must not be empty (the storage column is NOT NULL and the
///   listing format degenerates with blank names)
///
/// ## Returns
/// The trimmed name.
pub fn validate_product_name(text: &str) -> ValidationResult<String> {
    let name = text.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
