//! # Domain Types
//!
//! Core domain types used throughout Shelfstock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Brand       │   │  BrandDirectory │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  brand_id       │   │  id → name map  │       │
//! │  │  product_name   │   │  brand_name     │   │  "None" label   │       │
//! │  │  quantity       │   └─────────────────┘   │  for no brand   │       │
//! │  │  price (cents)  │                         └─────────────────┘       │
//! │  │  date_updated   │   ┌─────────────────┐                             │
//! │  │  brand_id (FK?) │   │   NewProduct    │                             │
//! │  └─────────────────┘   │  insert payload │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names match the storage columns one to one, so the row-mapping
//! derives stay trivial and the CSV backup header writes itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::money::Money;
use crate::{DISPLAY_DATE_FORMAT, NO_BRAND_LABEL};

// =============================================================================
// Brand
// =============================================================================

/// A product brand.
///
/// Brands are created by CSV import and referenced by products; they are
/// never edited or deleted through the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Brand {
    /// Unique identifier (row id).
    pub brand_id: i64,

    /// Brand name, unique across the store.
    pub brand_name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (row id).
    pub product_id: i64,

    /// Display name shown in listings and reports.
    pub product_name: String,

    /// Units on hand. Never negative.
    pub product_quantity: i64,

    /// Price in cents (smallest currency unit). Never negative.
    pub product_price: i64,

    /// When the record was created or last edited (UTC, midnight for
    /// operator-entered dates).
    pub date_updated: DateTime<Utc>,

    /// Owning brand, if any. `None` means unbranded.
    pub brand_id: Option<i64>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.product_price)
    }

    /// Returns `date_updated` in the operator-facing format,
    /// e.g. `November 01, 2018`.
    pub fn updated_display(&self) -> String {
        self.date_updated.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

// =============================================================================
// NewProduct
// =============================================================================

/// Payload for inserting a product; the store assigns the id.
///
/// Built by the session's add flow and by the CSV importer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_name: String,
    pub product_quantity: i64,
    pub product_price: i64,
    pub date_updated: DateTime<Utc>,
    pub brand_id: Option<i64>,
}

// =============================================================================
// Brand Directory
// =============================================================================

/// Resolves brand ids to display names.
///
/// Built once from the full brand list, then consulted by listings and the
/// analysis report. A `None` or dangling brand id resolves to the
/// [`NO_BRAND_LABEL`] sentinel instead of failing; a product must always be
/// displayable even if its brand row has gone missing.
#[derive(Debug, Clone, Default)]
pub struct BrandDirectory {
    names: BTreeMap<i64, String>,
}

impl BrandDirectory {
    /// Builds a directory from brand rows.
    pub fn new(brands: impl IntoIterator<Item = Brand>) -> Self {
        let names = brands
            .into_iter()
            .map(|b| (b.brand_id, b.brand_name))
            .collect();
        BrandDirectory { names }
    }

    /// Returns the display name for a product's brand reference.
    pub fn name_for(&self, brand_id: Option<i64>) -> &str {
        brand_id
            .and_then(|id| self.names.get(&id))
            .map(String::as_str)
            .unwrap_or(NO_BRAND_LABEL)
    }

    /// Number of known brands.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no brands are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
