//! # Inventory Service
//!
//! The one API a front end talks to. Owns the database handle, creates the
//! schema, and routes each call to the credential or product repository.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   InventoryService::new(config)                                        │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   ┌───────────────┐   initialize()    ┌───────────────┐                │
//! │   │ Uninitialized │ ────────────────► │     Ready     │ ◄─┐            │
//! │   └───────────────┘  connect+migrate  └───────────────┘   │            │
//! │          │                                   │  initialize() (no-op)   │
//! │          │ any CRUD call                     └────────────┘            │
//! │          ▼                                                              │
//! │   Err(NotInitialized)                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let service = InventoryService::new(InventoryConfig::from_env()?);
//! service.initialize().await?;
//!
//! service.register("alice", "s3cret").await?;
//! assert!(service.login("alice", "s3cret").await?);
//!
//! let id = service.add_product("Widget", 10, 2.50).await?;
//! let low = service.low_stock(None).await?;
//! ```

use std::sync::OnceLock;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::InventoryConfig;
use crate::error::{DbError, InventoryError, InventoryResult};
use crate::pool::Database;
use stockroom_core::password::{hash_password, verify_password};
use stockroom_core::validation::{validate_password, validate_threshold, validate_username};
use stockroom_core::{Product, ProductDraft, ProductId};

/// Lifecycle state of an [`InventoryService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No storage handle yet; every CRUD/query call fails.
    Uninitialized,
    /// Schema exists and the pool is open.
    Ready,
}

/// Composition root over [`UserRepository`](crate::UserRepository) and
/// [`ProductRepository`](crate::ProductRepository).
///
/// Holds no business rules beyond validation and routing. Share it across
/// tasks behind an `Arc`; every call borrows a pooled connection for a single
/// statement.
#[derive(Debug)]
pub struct InventoryService {
    config: InventoryConfig,
    db: OnceCell<Database>,
}

impl InventoryService {
    /// Creates an uninitialized service. Does not touch storage.
    pub fn new(config: InventoryConfig) -> Self {
        InventoryService {
            config,
            db: OnceCell::new(),
        }
    }

    /// Opens the pool and creates the schema if absent.
    ///
    /// Calling this again once ready does nothing and returns `Ok(())`.
    /// On failure the service stays uninitialized and may be retried.
    pub async fn initialize(&self) -> InventoryResult<()> {
        self.db
            .get_or_try_init(|| async {
                let db = Database::new(self.config.db.clone()).await?;
                db.run_migrations().await?;
                info!(
                    path = %self.config.db.database_path.display(),
                    "Inventory store ready"
                );
                Ok::<_, DbError>(db)
            })
            .await?;

        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        if self.db.initialized() {
            LifecycleState::Ready
        } else {
            LifecycleState::Uninitialized
        }
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    fn db(&self) -> InventoryResult<&Database> {
        self.db.get().ok_or(InventoryError::NotInitialized)
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    /// Registers a user.
    ///
    /// ## Returns
    /// * `Ok(true)` - Registered
    /// * `Ok(false)` - Username already exists; the stored hash is unchanged
    /// * `Err(Validation)` - Empty or over-long username, empty password
    pub async fn register(&self, username: &str, password: &str) -> InventoryResult<bool> {
        let db = self.db()?;

        validate_username(username)?;
        validate_password(password)?;

        let hash = hash_password(password)?;

        match db.users().insert(username, &hash).await {
            Ok(user_id) => {
                info!(user_id = %user_id, username = %username, "User registered");
                Ok(true)
            }
            Err(e) if e.is_unique_violation() => {
                warn!(username = %username, "Registration rejected: username taken");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks a login attempt.
    ///
    /// Unknown user, wrong password and malformed input all return
    /// `Ok(false)` with no further detail.
    pub async fn login(&self, username: &str, password: &str) -> InventoryResult<bool> {
        let db = self.db()?;

        if username.is_empty() || password.is_empty() {
            return Ok(false);
        }

        let verified = match db.users().get_by_username(username).await? {
            Some(user) => verify_password(password, &user.password_hash),
            None => {
                // Unknown users cost one verify too, keeping timing uniform
                if let Some(dummy) = timing_dummy_hash() {
                    let _ = verify_password(password, dummy);
                }
                false
            }
        };

        debug!(username = %username, verified = verified, "Login attempt");
        Ok(verified)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Adds a product and returns its new id.
    pub async fn add_product(
        &self,
        name: &str,
        quantity: i64,
        price: f64,
    ) -> InventoryResult<ProductId> {
        let db = self.db()?;

        let draft = ProductDraft::new(name, quantity, price);
        draft.validate()?;

        let id = db.products().insert(&draft).await?;
        info!(id = %id, name = %name, quantity = quantity, "Product added");
        Ok(id)
    }

    /// Replaces name, quantity and price of product `id`.
    ///
    /// A missing `id` is a no-op. Failures carry `id`
    /// ([`InventoryError::InvalidProduct`], [`InventoryError::ProductStorage`]).
    pub async fn update_product(
        &self,
        id: ProductId,
        name: &str,
        quantity: i64,
        price: f64,
    ) -> InventoryResult<()> {
        let db = self.db()?;

        let draft = ProductDraft::new(name, quantity, price);
        draft
            .validate()
            .map_err(|e| InventoryError::for_product(id, e.into()))?;

        let rows = db
            .products()
            .update(id, &draft)
            .await
            .map_err(|e| InventoryError::for_product(id, e.into()))?;

        match rows {
            0 => debug!(id = %id, "Update skipped: no such product"),
            _ => info!(id = %id, quantity = quantity, "Product updated"),
        }

        Ok(())
    }

    /// Deletes product `id`. A missing `id` is a no-op.
    pub async fn delete_product(&self, id: ProductId) -> InventoryResult<()> {
        let db = self.db()?;

        let rows = db
            .products()
            .delete(id)
            .await
            .map_err(|e| InventoryError::for_product(id, e.into()))?;

        match rows {
            0 => debug!(id = %id, "Delete skipped: no such product"),
            _ => info!(id = %id, "Product deleted"),
        }

        Ok(())
    }

    /// Gets a single product.
    pub async fn get_product(&self, id: ProductId) -> InventoryResult<Option<Product>> {
        Ok(self.db()?.products().get_by_id(id).await?)
    }

    /// Every product, ordered by id.
    pub async fn list_products(&self) -> InventoryResult<Vec<Product>> {
        Ok(self.db()?.products().list().await?)
    }

    /// Products with `quantity <= threshold`, ordered by id.
    ///
    /// `None` uses the configured threshold (5 unless overridden).
    pub async fn low_stock(&self, threshold: Option<i64>) -> InventoryResult<Vec<Product>> {
        let db = self.db()?;

        let threshold = threshold.unwrap_or(self.config.low_stock_threshold);
        validate_threshold(threshold)?;

        Ok(db.products().low_stock(threshold).await?)
    }

    /// Number of products in the catalog.
    pub async fn product_count(&self) -> InventoryResult<i64> {
        Ok(self.db()?.products().count().await?)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// `(total, applied)` migration counts.
    pub async fn migration_status(&self) -> InventoryResult<(usize, usize)> {
        Ok(self.db()?.migration_status().await?)
    }

    /// Whether storage answers a trivial query. `false` before `initialize()`.
    pub async fn health_check(&self) -> bool {
        match self.db.get() {
            Some(db) => db.health_check().await,
            None => false,
        }
    }

    /// Closes the pool. Later calls fail with a storage error.
    pub async fn close(&self) {
        if let Some(db) = self.db.get() {
            db.close().await;
        }
    }
}

/// A valid hash of a fixed string, used to equalize login timing.
fn timing_dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("stockroom-unknown-user").ok())
        .as_deref()
}

// =============================================================================
// Unit Tests
// =============================================================================
