//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD on the `products` table
//! - Low-stock query (`quantity <= threshold`)
//!
//! ## Ordering
//! Every multi-row read is `ORDER BY id ASC`, so two reads of the same
//! table state return the same sequence.
//!
//! ## Missing Ids
//! `update` and `delete` report how many rows they touched instead of
//! failing; a missing id affects zero rows and nothing else happens.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::{Product, ProductDraft, ProductId};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let id = repo.insert(&ProductDraft::new("Widget", 10, 2.50)).await?;
/// let low = repo.low_stock(5).await?;
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

    /// Inserts a new product and returns its freshly assigned id.
    ///
    /// The draft is expected to be validated already.
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<ProductId> {
        debug!(name = %draft.name, quantity = draft.quantity, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, quantity, price, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(&draft.name)
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id = %id, "Product inserted");
        Ok(id)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces name, quantity and price of the product with `id`.
    ///
    /// ## Returns
    /// Number of rows changed: `1` if the product exists, `0` otherwise.
    pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> DbResult<u64> {
        debug!(id = %id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                quantity = ?3,
                price = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Hard-deletes the product with `id`.
    ///
    /// ## Returns
    /// Number of rows removed: `1` if the product existed, `0` otherwise.
    pub async fn delete(&self, id: ProductId) -> DbResult<u64> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Lists every product, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price, created_at, updated_at
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Lists products with `quantity <= threshold`, ordered by id.
    ///
    /// Served by `idx_products_quantity`.
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, price, created_at, updated_at
            FROM products
            WHERE quantity <= ?1
            ORDER BY id ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        debug!(threshold = threshold, count = products.len(), "Low-stock query");
        Ok(products)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
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
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.run_migrations().await.unwrap();
        db.products()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = repo().await;

        let a = repo.insert(&ProductDraft::new("Widget", 10, 2.50)).await.unwrap();
        let b = repo.insert(&ProductDraft::new("Gadget", 3, 9.99)).await.unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id_roundtrips_fields() {
        let repo = repo().await;
        let id = repo.insert(&ProductDraft::new("Widget", 10, 2.50)).await.unwrap();

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.quantity, 10);
        assert_eq!(product.price, 2.50);
        assert_eq!(product.created_at, product.updated_at);

        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_reports_rows_affected() {
        let repo = repo().await;
        let id = repo.insert(&ProductDraft::new("Widget", 10, 2.50)).await.unwrap();

        let changed = repo
            .update(id, &ProductDraft::new("Widget XL", 4, 3.00))
            .await
            .unwrap();
        assert_eq!(changed, 1);

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.name, "Widget XL");
        assert_eq!((product.quantity, product.price), (4, 3.00));
        assert!(product.updated_at >= product.created_at);

        let missing = repo
            .update(id + 100, &ProductDraft::new("Ghost", 1, 1.0))
            .await
            .unwrap();
        assert_eq!(missing, 0);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice_is_harmless() {
        let repo = repo().await;
        let id = repo.insert(&ProductDraft::new("Widget", 10, 2.50)).await.unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert_eq!(repo.delete(id).await.unwrap(), 0);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let repo = repo().await;
        let first = repo.insert(&ProductDraft::new("A", 1, 1.0)).await.unwrap();
        repo.delete(first).await.unwrap();

        let second = repo.insert(&ProductDraft::new("B", 1, 1.0)).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = repo().await;
        for (name, qty) in [("C", 3), ("A", 1), ("B", 2)] {
            repo.insert(&ProductDraft::new(name, qty, 1.0)).await.unwrap();
        }

        let ids: Vec<_> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_low_stock_is_inclusive() {
        let repo = repo().await;
        for qty in [0, 4, 5, 6, 50] {
            repo.insert(&ProductDraft::new(format!("Q{qty}"), qty, 1.0))
                .await
                .unwrap();
        }

        let quantities: Vec<_> = repo
            .low_stock(5)
            .await
            .unwrap()
            .iter()
            .map(|p| p.quantity)
            .collect();
        assert_eq!(quantities, vec![0, 4, 5]);

        assert_eq!(repo.low_stock(50).await.unwrap().len(), 5);
        assert_eq!(repo.low_stock(0).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_check_constraint_backs_up_validation() {
        let repo = repo().await;

        let err = repo
            .insert(&ProductDraft::new("Widget", -1, 2.50))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
