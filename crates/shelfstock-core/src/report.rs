//! # Reporting Engine
//!
//! Descriptive statistics over the current inventory snapshot.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Analysis Pipeline                                 │
//! │                                                                         │
//! │  ProductRepository::list()  (ascending product_id)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryReport::analyze(&products)                                   │
//! │       │                                                                 │
//! │       ├── extremes: most/least expensive, oldest/newest,               │
//! │       │             highest/lowest quantity (one pass, first wins)     │
//! │       ├── PriceStats::compute: mean, median, mode, population          │
//! │       │             variance, std deviation, exclusive quartiles       │
//! │       └── brand popularity: counts per brand, most/least common        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryReport::render(&BrandDirectory) → plain text for the        │
//! │  terminal (the ONLY place cents become dollar strings)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! Every tie has a documented winner, so the same snapshot always yields
//! the same report:
//! - extremes: the first product in input order (ascending id) wins
//! - mode: the smallest of the most frequent prices wins
//! - brand counts: the smallest brand id wins
//!
//! ## Numeric Ground Rules
//! - Inputs are integer cents; sums run over i128 so no realistic inventory
//!   can overflow
//! - Variance and standard deviation are *population* figures (divisor N,
//!   never N-1): the inventory is the entire population, not a sample
//! - Quartiles use the exclusive method: linear interpolation between order
//!   statistics with the interpolation point clamped to the data, which
//!   extrapolates past the edges for very small inputs
//! - All fractional results stay in f64 cents until [`render`] formats them
//!
//! [`render`]: InventoryReport::render

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::{format_price, Money};
use crate::types::{BrandDirectory, Product};
use crate::NO_BRAND_LABEL;

// =============================================================================
// Price Statistics
// =============================================================================

/// Descriptive statistics over a non-empty price list, in cents.
///
/// `mean`, `median`, `variance`, `std_dev` and the quartiles are exact
/// f64 values in cents; `mode` is always one of the input prices and so
/// stays a [`Money`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub mean: f64,
    pub median: f64,
    pub mode: Money,
    pub variance: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl PriceStats {
    /// Computes the full statistics block for a list of prices in cents.
    ///
    /// The input order does not matter; a sorted copy is taken once and
    /// shared by the median, mode, and quartile calculations.
    ///
    /// ## Errors
    /// [`CoreError::EmptyInventory`] when `prices` is empty. Statistics
    /// over nothing are undefined, and callers show a notice instead.
    pub fn compute(prices: &[i64]) -> CoreResult<Self> {
        if prices.is_empty() {
            return Err(CoreError::EmptyInventory);
        }

        let mut sorted = prices.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let sum: i128 = sorted.iter().map(|&p| p as i128).sum();
        let mean = sum as f64 / count as f64;

        let median = median_of(&sorted);
        let mode = Money::from_cents(mode_of(&sorted));

        let variance = sorted
            .iter()
            .map(|&p| {
                let deviation = p as f64 - mean;
                deviation * deviation
            })
            .sum::<f64>()
            / count as f64;
        let std_dev = variance.sqrt();

        let (q1, q2, q3) = quartiles_of(&sorted);

        Ok(PriceStats {
            mean,
            median,
            mode,
            variance,
            std_dev,
            q1,
            q2,
            q3,
        })
    }

    /// Interquartile range: the spread of the middle 50% of prices.
    ///
    /// More robust than max - min because a single outlier barely moves it.
    #[inline]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Median of a sorted, non-empty slice.
fn median_of(sorted: &[i64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    }
}

/// Most frequent value of a sorted, non-empty slice.
///
/// Equal runs sit adjacent after sorting, so one run-length scan finds the
/// answer. The strict `>` keeps the first (smallest) value on frequency
/// ties.
fn mode_of(sorted: &[i64]) -> i64 {
    let mut best = sorted[0];
    let mut best_run = 0usize;
    let mut current = sorted[0];
    let mut run = 0usize;

    for &price in sorted {
        if price == current {
            run += 1;
        } else {
            current = price;
            run = 1;
        }
        if run > best_run {
            best = current;
            best_run = run;
        }
    }

    best
}

/// Quartiles of a sorted, non-empty slice by the exclusive method.
///
/// With `ld` data points and `m = ld + 1`, the i-th quartile sits at
/// position `i*m/4` between order statistics: take `j = (i*m)/4` truncated,
/// clamp it into `1..=ld-1`, then interpolate between `sorted[j-1]` and
/// `sorted[j]` with weight `delta = i*m - j*4`. The delta is computed from
/// the *clamped* j, so tiny inputs extrapolate linearly past the data
/// edges (two points [100, 200] yield 75/150/225).
///
/// A single data point has no interior to interpolate in; all three
/// quartiles collapse to the value itself so a one-product inventory still
/// reports.
fn quartiles_of(sorted: &[i64]) -> (f64, f64, f64) {
    let ld = sorted.len();
    if ld == 1 {
        let only = sorted[0] as f64;
        return (only, only, only);
    }

    let m = ld + 1;
    let mut quartiles = [0.0f64; 3];
    for (slot, i) in (1..=3usize).enumerate() {
        let j = ((i * m) / 4).clamp(1, ld - 1);
        let delta = (i * m) as i64 - (j * 4) as i64;
        // i128 keeps the weighted sum exact even for extreme prices;
        // delta may be negative when j was clamped.
        let weighted = sorted[j - 1] as i128 * (4 - delta) as i128
            + sorted[j] as i128 * delta as i128;
        quartiles[slot] = weighted as f64 / 4.0;
    }

    (quartiles[0], quartiles[1], quartiles[2])
}

// =============================================================================
// Brand Popularity
// =============================================================================

/// How many products reference one brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCount {
    pub brand_id: i64,
    pub product_count: u64,
}

/// The most and least referenced brands in the inventory.
///
/// When exactly one brand is referenced it is both the most and the least
/// common.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandPopularity {
    pub most_common: BrandCount,
    pub least_common: BrandCount,
}

/// Counts products per brand and picks the extremes.
///
/// Products without a brand are not counted, and neither is the literal
/// brand id 0 (legacy imports used 0 as a stand-in for "no brand").
/// Returns `None` when nothing is countable. The BTreeMap traversal runs
/// in ascending brand id with strict comparisons, so count ties resolve to
/// the smallest id.
fn brand_popularity(products: &[Product]) -> Option<BrandPopularity> {
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    for product in products {
        match product.brand_id {
            Some(id) if id != 0 => *counts.entry(id).or_insert(0) += 1,
            _ => {}
        }
    }

    let mut entries = counts.into_iter();
    let (first_id, first_count) = entries.next()?;
    let mut most = BrandCount {
        brand_id: first_id,
        product_count: first_count,
    };
    let mut least = most.clone();

    for (id, count) in entries {
        if count > most.product_count {
            most = BrandCount {
                brand_id: id,
                product_count: count,
            };
        }
        if count < least.product_count {
            least = BrandCount {
                brand_id: id,
                product_count: count,
            };
        }
    }

    Some(BrandPopularity {
        most_common: most,
        least_common: least,
    })
}

// =============================================================================
// Inventory Report
// =============================================================================

/// The full analysis over one inventory snapshot.
///
/// Holds owned copies of the extreme products so the report outlives the
/// snapshot it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport {
    pub total_count: usize,
    pub most_expensive: Product,
    pub least_expensive: Product,
    pub oldest: Product,
    pub newest: Product,
    pub highest_quantity: Product,
    pub lowest_quantity: Product,
    pub price_stats: PriceStats,
    pub brand_popularity: Option<BrandPopularity>,
}

impl InventoryReport {
    /// Analyzes a snapshot of products.
    ///
    /// The slice must be in ascending `product_id` order (the store's
    /// enumeration order); the extreme tie-breaks are defined in terms of
    /// that order.
    ///
    /// ## Errors
    /// [`CoreError::EmptyInventory`] when the snapshot is empty.
    pub fn analyze(products: &[Product]) -> CoreResult<Self> {
        let (first, rest) = products.split_first().ok_or(CoreError::EmptyInventory)?;

        let mut most_expensive = first;
        let mut least_expensive = first;
        let mut oldest = first;
        let mut newest = first;
        let mut highest_quantity = first;
        let mut lowest_quantity = first;

        // Strict comparisons: the earliest product wins every tie.
        for product in rest {
            if product.product_price > most_expensive.product_price {
                most_expensive = product;
            }
            if product.product_price < least_expensive.product_price {
                least_expensive = product;
            }
            if product.date_updated < oldest.date_updated {
                oldest = product;
            }
            if product.date_updated > newest.date_updated {
                newest = product;
            }
            if product.product_quantity > highest_quantity.product_quantity {
                highest_quantity = product;
            }
            if product.product_quantity < lowest_quantity.product_quantity {
                lowest_quantity = product;
            }
        }

        let prices: Vec<i64> = products.iter().map(|p| p.product_price).collect();
        let price_stats = PriceStats::compute(&prices)?;

        Ok(InventoryReport {
            total_count: products.len(),
            most_expensive: most_expensive.clone(),
            least_expensive: least_expensive.clone(),
            oldest: oldest.clone(),
            newest: newest.clone(),
            highest_quantity: highest_quantity.clone(),
            lowest_quantity: lowest_quantity.clone(),
            price_stats,
            brand_popularity: brand_popularity(products),
        })
    }

    /// Formats the report for the terminal.
    ///
    /// This is the single place where statistical cents become dollar
    /// strings. Exact cent amounts (mode, rounded variance) go through
    /// [`Money`]; fractional aggregates go through [`format_price`].
    pub fn render(&self, brands: &BrandDirectory) -> String {
        let stats = &self.price_stats;
        let mut lines = Vec::new();

        lines.push(format!("Total products: {}", self.total_count));
        lines.push(format!(
            "Most expensive: {}: {}",
            self.most_expensive.price(),
            self.most_expensive.product_name
        ));
        lines.push(format!(
            "Least expensive: {}: {}",
            self.least_expensive.price(),
            self.least_expensive.product_name
        ));

        match &self.brand_popularity {
            Some(popularity) => {
                lines.push(format!(
                    "Most common brand: {}, Product count: {}",
                    brands.name_for(Some(popularity.most_common.brand_id)),
                    popularity.most_common.product_count
                ));
                lines.push(format!(
                    "Least common brand: {}, Product count: {}",
                    brands.name_for(Some(popularity.least_common.brand_id)),
                    popularity.least_common.product_count
                ));
            }
            None => {
                lines.push(format!(
                    "Most common brand: {}, Product count: 0",
                    NO_BRAND_LABEL
                ));
                lines.push(format!(
                    "Least common brand: {}, Product count: 0",
                    NO_BRAND_LABEL
                ));
            }
        }

        lines.push(format!(
            "Oldest product: {}: {}",
            self.oldest.updated_display(),
            self.oldest.product_name
        ));
        lines.push(format!(
            "Newest product: {}: {}",
            self.newest.updated_display(),
            self.newest.product_name
        ));
        lines.push(format!(
            "Highest quantity: {} {}",
            self.highest_quantity.product_quantity, self.highest_quantity.product_name
        ));
        lines.push(format!(
            "Lowest quantity: {} {}",
            self.lowest_quantity.product_quantity, self.lowest_quantity.product_name
        ));
        lines.push(format!("Average price (mean): {}", format_price(stats.mean)));
        lines.push(format!("Mode price (most occurring value): {}", stats.mode));
        lines.push(format!(
            "Median price (sorted middle value): {}",
            format_price(stats.median)
        ));
        // Variance is shown to whole-cent precision; the fraction of a cent
        // carries no meaning for an operator.
        lines.push(format!(
            "Price variance: {}",
            Money::from_cents(stats.variance.round() as i64)
        ));
        lines.push(format!(
            "Price standard deviation: {}",
            format_price(stats.std_dev)
        ));
        lines.push("Quartiles:".to_string());
        lines.push(format!(
            "- Q1 (lower half price median): {}",
            format_price(stats.q1)
        ));
        lines.push(format!("- Q2 (median): {}", format_price(stats.q2)));
        lines.push(format!(
            "- Q3 (upper half price median): {}",
            format_price(stats.q3)
        ));
        lines.push(format!(
            "Interquartile range (IQR): {}",
            format_price(stats.iqr())
        ));

        lines.join("\n")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
