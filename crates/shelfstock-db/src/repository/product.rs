//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD with hard deletes (no history to preserve, unlike a sales ledger)
//! - Exact-name lookup ordered most recently updated first, which the
//!   add flow uses to coalesce duplicate names onto the newest row
//! - ID and count queries backing menu prompts and the brand listing

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use shelfstock_core::{NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Everything in the store, ready for the report engine
/// let products = repo.list().await?;
///
/// // Get by ID
/// let product = repo.get_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by ID.
    ///
    /// ## Usage
    /// The analysis report and the product listing both consume this;
    /// ascending ID keeps their output deterministic.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                product_id,
                product_name,
                product_quantity,
                product_price,
                date_updated,
                brand_id
            FROM products
            ORDER BY product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No product with this ID
    pub async fn get_by_id(&self, id: i64) -> DbResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                product_id,
                product_name,
                product_quantity,
                product_price,
                date_updated,
                brand_id
            FROM products
            WHERE product_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Finds products by exact name, most recently updated first.
    ///
    /// ## Usage
    /// The add flow checks this to detect duplicate names; index 0 is the
    /// row that an update-instead-of-insert should target. CSV import uses
    /// a non-empty result to skip rows already present.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                product_id,
                product_name,
                product_quantity,
                product_price,
                date_updated,
                brand_id
            FROM products
            WHERE product_name = ?1
            ORDER BY date_updated DESC
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Arguments
    /// * `product` - Field values for the new row; the store assigns the ID
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted row with its assigned ID
    /// * `Err(DbError::ForeignKeyViolation)` - `brand_id` references no brand
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.product_name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                product_name, product_quantity, product_price,
                date_updated, brand_id
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.product_name)
        .bind(product.product_quantity)
        .bind(product.product_price)
        .bind(product.date_updated)
        .bind(product.brand_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    /// Updates an existing product.
    ///
    /// ## Note
    /// Writes `date_updated` exactly as given; callers stamp the current
    /// time before saving an edit.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.product_id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                product_name = ?2,
                product_quantity = ?3,
                product_price = ?4,
                date_updated = ?5,
                brand_id = ?6
            WHERE product_id = ?1
            "#,
        )
        .bind(product.product_id)
        .bind(&product.product_name)
        .bind(product.product_quantity)
        .bind(product.product_price)
        .bind(product.date_updated)
        .bind(product.brand_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.product_id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE product_id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists all product IDs in ascending order.
    ///
    /// ## Usage
    /// The view-by-ID prompt validates typed IDs against this set and
    /// shows the `{first}-{last}` range.
    pub async fn ids(&self) -> DbResult<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT product_id FROM products ORDER BY product_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Counts total products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts products carrying the given brand.
    pub async fn count_by_brand(&self, brand_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE brand_id = ?1")
            .bind(brand_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
