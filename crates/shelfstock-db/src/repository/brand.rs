//! # Brand Repository
//!
//! Database operations for brands.
//!
//! ## Key Operations
//! - List all brands (ID order, for menus and reports)
//! - Lookup by ID or exact name
//! - Insert with uniqueness enforced by the schema

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use shelfstock_core::Brand;

/// Repository for brand database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BrandRepository::new(pool);
///
/// let acme = repo.insert("Acme").await?;
/// let all = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct BrandRepository {
    pool: SqlitePool,
}

impl BrandRepository {
    /// Creates a new BrandRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BrandRepository { pool }
    }

    /// Lists all brands ordered by ID.
    pub async fn list(&self) -> DbResult<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>(
            r#"
            SELECT brand_id, brand_name
            FROM brands
            ORDER BY brand_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }

    /// Gets a brand by its ID.
    ///
    /// ## Returns
    /// * `Ok(Brand)` - Brand found
    /// * `Err(DbError::NotFound)` - No brand with this ID
    pub async fn get_by_id(&self, id: i64) -> DbResult<Brand> {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            SELECT brand_id, brand_name
            FROM brands
            WHERE brand_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        brand.ok_or_else(|| DbError::not_found("Brand", id))
    }

    /// Gets a brand by its exact name.
    ///
    /// ## Returns
    /// * `Ok(Some(Brand))` - Brand found
    /// * `Ok(None)` - No brand with this name
    ///
    /// ## Usage
    /// CSV import uses this to skip brands that already exist.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            SELECT brand_id, brand_name
            FROM brands
            WHERE brand_name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brand)
    }

    /// Inserts a new brand.
    ///
    /// ## Arguments
    /// * `name` - Brand name (must be unique)
    ///
    /// ## Returns
    /// * `Ok(Brand)` - Inserted brand with its assigned ID
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, name: &str) -> DbResult<Brand> {
        debug!(name = %name, "Inserting brand");

        let result = sqlx::query(
            r#"
            INSERT INTO brands (brand_name)
            VALUES (?1)
            "#,
        )
        .bind(name)
        .execute(&self.pool)
        .await?;

        // SQLite assigns the rowid; read the row back so the caller
        // gets the same Brand a later list() would return
        self.get_by_id(result.last_insert_rowid()).await
    }

    /// Counts total brands.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    use super::*;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_ordered_by_id() {
        let db = test_db().await;
        let repo = db.brands();

        let zeta = repo.insert("Zeta").await.unwrap();
        let acme = repo.insert("Acme").await.unwrap();

        assert_eq!(zeta.brand_name, "Zeta");
        assert!(acme.brand_id > zeta.brand_id);

        // ID order, not name order
        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].brand_name, "Zeta");
        assert_eq!(all[1].brand_name, "Acme");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = test_db().await;

        let err = db.brands().get_by_id(999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let db = test_db().await;
        let repo = db.brands();

        let inserted = repo.insert("Monoprice").await.unwrap();

        let found = repo.get_by_name("Monoprice").await.unwrap();
        assert_eq!(found, Some(inserted));

        assert_eq!(repo.get_by_name("monoprice").await.unwrap(), None);
        assert_eq!(repo.get_by_name("Nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = test_db().await;
        let repo = db.brands();

        repo.insert("Acme").await.unwrap();
        let err = repo.insert("Acme").await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        let repo = db.brands();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert("Acme").await.unwrap();
        repo.insert("Globex").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
