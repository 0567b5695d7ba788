//! # CSV Import & Export
//!
//! File-based seeding and backup for the inventory store.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  brands.csv ──────► import_brands ──────► brands table          │
//! │  inventory.csv ───► import_products ────► products table        │
//! │  products table ──► export_backup ──────► inventory-backup.csv  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Failure Contract
//! Import failures are per-row: a malformed price, an impossible date, or an
//! unknown brand fails that row, bumps the `failed` count, and the batch
//! continues. Only file-level problems (missing file, no read permission)
//! abort an import.
//!
//! ## Formats
//! Import files carry operator-facing text (`$4.99` prices, `month/day/year`
//! dates) and pass through the same validators the interactive prompts use.
//! The backup writes machine values instead: raw integer minor units and
//! RFC 3339 timestamps.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::pool::Database;
use shelfstock_core::validation::{parse_date, parse_price, parse_quantity, validate_product_name};
use shelfstock_core::{Money, NewProduct, ValidationError};

// =============================================================================
// Import Summary
// =============================================================================

/// Per-batch outcome counts returned by the importers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows written to the store.
    pub imported: u64,
    /// Rows already present (matched by name) and left untouched.
    pub skipped: u64,
    /// Rows rejected by validation or brand resolution.
    pub failed: u64,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} imported, {} skipped, {} failed",
            self.imported, self.skipped, self.failed
        )
    }
}

// =============================================================================
// Row Shapes
// =============================================================================

/// One row of a brand seed file. Header: `brand_name`.
#[derive(Debug, Deserialize)]
struct BrandRow {
    brand_name: String,
}

/// One row of a product seed file. Header:
/// `product_name,product_quantity,product_price,brand_name,date_updated`.
///
/// All fields arrive as text and go through the core validators, so a seed
/// file tolerates exactly what an operator could type at the prompts.
#[derive(Debug, Deserialize)]
struct ProductRow {
    product_name: String,
    product_quantity: String,
    product_price: String,
    brand_name: String,
    date_updated: String,
}

/// One row of the backup file. Field order is the column order.
#[derive(Debug, Serialize)]
struct BackupRow<'a> {
    product_id: i64,
    product_name: &'a str,
    product_quantity: i64,
    product_price: i64,
    brand_id: Option<i64>,
    date_updated: String,
}

// =============================================================================
// Import
// =============================================================================

/// Imports brands from a CSV file.
///
/// A row whose name matches an existing brand is skipped, leaving the
/// existing row and its ID untouched. Rows with blank names fail.
pub async fn import_brands(db: &Database, path: impl AsRef<Path>) -> DbResult<ImportSummary> {
    let path = path.as_ref();
    info!(path = %path.display(), "Importing brands");

    let mut reader = csv::Reader::from_path(path)?;
    let mut summary = ImportSummary::default();

    for row in reader.deserialize::<BrandRow>() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!(error = %e, "Unreadable brand row");
                summary.failed += 1;
                continue;
            }
        };

        let name = row.brand_name.trim();
        if name.is_empty() {
            warn!("Brand row with blank name");
            summary.failed += 1;
            continue;
        }

        if db.brands().get_by_name(name).await?.is_some() {
            debug!(name = %name, "Brand already present");
            summary.skipped += 1;
            continue;
        }

        db.brands().insert(name).await?;
        summary.imported += 1;
    }

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        failed = summary.failed,
        "Brand import finished"
    );
    Ok(summary)
}

/// Imports products from a CSV file.
///
/// A row whose name matches an existing product is skipped. The brand name
/// must resolve to an existing brand (import brands first); rows with an
/// unknown brand or malformed fields fail individually.
pub async fn import_products(db: &Database, path: impl AsRef<Path>) -> DbResult<ImportSummary> {
    let path = path.as_ref();
    info!(path = %path.display(), "Importing products");

    let mut reader = csv::Reader::from_path(path)?;
    let mut summary = ImportSummary::default();

    for row in reader.deserialize::<ProductRow>() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!(error = %e, "Unreadable product row");
                summary.failed += 1;
                continue;
            }
        };

        let name = match validate_product_name(&row.product_name) {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Product row with blank name");
                summary.failed += 1;
                continue;
            }
        };

        if !db.products().find_by_name(&name).await?.is_empty() {
            debug!(name = %name, "Product already present");
            summary.skipped += 1;
            continue;
        }

        let (quantity, price, date) = match parse_product_fields(&row) {
            Ok(fields) => fields,
            Err(e) => {
                warn!(product = %name, error = %e, "Malformed product row");
                summary.failed += 1;
                continue;
            }
        };

        let brand = match db.brands().get_by_name(row.brand_name.trim()).await? {
            Some(brand) => brand,
            None => {
                warn!(product = %name, brand = %row.brand_name, "Unknown brand in product row");
                summary.failed += 1;
                continue;
            }
        };

        let new_product = NewProduct {
            product_name: name,
            product_quantity: quantity,
            product_price: price.cents(),
            date_updated: date,
            brand_id: Some(brand.brand_id),
        };
        db.products().insert(&new_product).await?;
        summary.imported += 1;
    }

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        failed = summary.failed,
        "Product import finished"
    );
    Ok(summary)
}

/// Parses the typed fields of a product row through the core validators.
fn parse_product_fields(row: &ProductRow) -> Result<(i64, Money, DateTime<Utc>), ValidationError> {
    let quantity = parse_quantity(&row.product_quantity)?;
    let price = parse_price(&row.product_price)?;
    let date = parse_date(&row.date_updated)?;
    Ok((quantity, price, date))
}

// =============================================================================
// Export
// =============================================================================

/// Writes every product to a CSV backup file, ascending by ID.
///
/// ## Returns
/// Number of rows written (header excluded).
pub async fn export_backup(db: &Database, path: impl AsRef<Path>) -> DbResult<usize> {
    let path = path.as_ref();
    info!(path = %path.display(), "Backing up products");

    let products = db.products().list().await?;

    let mut writer = csv::Writer::from_path(path)?;
    for product in &products {
        writer.serialize(BackupRow {
            product_id: product.product_id,
            product_name: &product.product_name,
            product_quantity: product.product_quantity,
            product_price: product.product_price,
            brand_id: product.brand_id,
            date_updated: product.date_updated.to_rfc3339(),
        })?;
    }
    writer.flush()?;

    info!(rows = products.len(), "Backup written");
    Ok(products.len())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::{Datelike, TimeZone};

    use crate::pool::DbConfig;

    use super::*;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_import_brands_then_reimport_skips() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "brands.csv", "brand_name\nAcme\nGlobex\nInitech\n");

        let summary = import_brands(&db, &path).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 3,
                skipped: 0,
                failed: 0
            }
        );

        let names: Vec<String> = db
            .brands()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.brand_name)
            .collect();
        assert_eq!(names, vec!["Acme", "Globex", "Initech"]);

        // Second pass finds everything already present
        let summary = import_brands(&db, &path).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 0,
                skipped: 3,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_import_brands_blank_name_fails_row() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "brands.csv", "brand_name\nAcme\n   \n");

        let summary = import_brands(&db, &path).await.unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn test_import_products_parses_operator_formats() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "brands.csv", "brand_name\nAcme\n");
        import_brands(&db, dir.path().join("brands.csv")).await.unwrap();

        let path = write_file(
            &dir,
            "inventory.csv",
            "product_name,product_quantity,product_price,brand_name,date_updated\n\
             USB Cable,30,$5.99,Acme,11/1/2018\n\
             Wall Charger,12,19.99,Acme,2/28/2019\n",
        );

        let summary = import_products(&db, &path).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 2,
                skipped: 0,
                failed: 0
            }
        );

        let products = db.products().list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_name, "USB Cable");
        assert_eq!(products[0].product_quantity, 30);
        assert_eq!(products[0].product_price, 599);
        assert_eq!(
            products[0].date_updated,
            Utc.with_ymd_and_hms(2018, 11, 1, 0, 0, 0).unwrap()
        );
        assert!(products[0].brand_id.is_some());
        assert_eq!(products[1].product_price, 1999);
    }

    #[tokio::test]
    async fn test_import_products_skips_existing_names() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "brands.csv", "brand_name\nAcme\n");
        import_brands(&db, dir.path().join("brands.csv")).await.unwrap();
        let path = write_file(
            &dir,
            "inventory.csv",
            "product_name,product_quantity,product_price,brand_name,date_updated\n\
             USB Cable,30,5.99,Acme,11/1/2018\n",
        );

        import_products(&db, &path).await.unwrap();
        let summary = import_products(&db, &path).await.unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 0,
                skipped: 1,
                failed: 0
            }
        );
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_import_products_bad_rows_fail_individually() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "brands.csv", "brand_name\nAcme\n");
        import_brands(&db, dir.path().join("brands.csv")).await.unwrap();

        // Unknown brand, bad price, impossible date, then one good row
        let path = write_file(
            &dir,
            "inventory.csv",
            "product_name,product_quantity,product_price,brand_name,date_updated\n\
             Mystery Widget,1,9.99,Nobody,1/1/2020\n\
             Free Widget,1,gratis,Acme,1/1/2020\n\
             Time Widget,1,9.99,Acme,2/30/2020\n\
             Real Widget,1,9.99,Acme,1/1/2020\n",
        );

        let summary = import_products(&db, &path).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                skipped: 0,
                failed: 3
            }
        );

        let products = db.products().list().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "Real Widget");
    }

    #[tokio::test]
    async fn test_import_missing_file_is_an_error() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();

        let result = import_brands(&db, dir.path().join("nope.csv")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_export_backup_writes_machine_formats() {
        let db = test_db().await;
        let brand = db.brands().insert("Acme").await.unwrap();

        db.products()
            .insert(&NewProduct {
                product_name: "USB Cable".to_string(),
                product_quantity: 30,
                product_price: 599,
                date_updated: Utc.with_ymd_and_hms(2018, 11, 1, 0, 0, 0).unwrap(),
                brand_id: Some(brand.brand_id),
            })
            .await
            .unwrap();
        db.products()
            .insert(&NewProduct {
                product_name: "Mystery Box".to_string(),
                product_quantity: 1,
                product_price: 10000,
                date_updated: Utc.with_ymd_and_hms(2019, 2, 28, 0, 0, 0).unwrap(),
                brand_id: None,
            })
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory-backup.csv");
        let rows = export_backup(&db, &path).await.unwrap();
        assert_eq!(rows, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "product_id,product_name,product_quantity,product_price,brand_id,date_updated"
        );
        assert_eq!(
            lines[1],
            format!(
                "1,USB Cable,30,599,{},2018-11-01T00:00:00+00:00",
                brand.brand_id
            )
        );
        // Unbranded row leaves brand_id empty
        assert_eq!(lines[2], "2,Mystery Box,1,10000,,2019-02-28T00:00:00+00:00");
    }

    #[tokio::test]
    async fn test_backup_adapted_to_seed_format_reimports_identically() {
        let source = test_db().await;
        source.brands().insert("Acme").await.unwrap();
        source.brands().insert("Zenith").await.unwrap();
        for (name, quantity, price, (year, month, day), brand_id) in [
            ("USB Cable", 30, 599, (2018, 11, 1), Some(1)),
            ("Patch Kit", 12, 1250, (2019, 2, 28), Some(2)),
            ("Label Maker", 5, 2449, (2020, 6, 15), Some(1)),
        ] {
            source
                .products()
                .insert(&NewProduct {
                    product_name: name.to_string(),
                    product_quantity: quantity,
                    product_price: price,
                    date_updated: Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
                    brand_id,
                })
                .await
                .unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let backup = dir.path().join("backup.csv");
        export_backup(&source, &backup).await.unwrap();

        // Turn the machine fields back into the operator seed format:
        // cents to a decimal price, brand id to brand name, RFC 3339 to
        // month/day/year.
        let contents = std::fs::read_to_string(&backup).unwrap();
        let mut seed =
            String::from("product_name,product_quantity,product_price,brand_name,date_updated\n");
        for line in contents.lines().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            let cents: i64 = fields[3].parse().unwrap();
            let brand_name = match fields[4] {
                "1" => "Acme",
                "2" => "Zenith",
                other => panic!("unexpected brand id {other}"),
            };
            let date = DateTime::parse_from_rfc3339(fields[5]).unwrap();
            seed.push_str(&format!(
                "{},{},{}.{:02},{},{}/{}/{}\n",
                fields[1],
                fields[2],
                cents / 100,
                cents % 100,
                brand_name,
                date.month(),
                date.day(),
                date.year()
            ));
        }
        let seed_path = write_file(&dir, "inventory.csv", &seed);

        let target = test_db().await;
        target.brands().insert("Acme").await.unwrap();
        target.brands().insert("Zenith").await.unwrap();
        let summary = import_products(&target, &seed_path).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 3,
                skipped: 0,
                failed: 0
            }
        );

        assert_eq!(
            source.products().list().await.unwrap(),
            target.products().list().await.unwrap()
        );
    }
}
