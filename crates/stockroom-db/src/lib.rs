//! # stockroom-db: Database Layer for Stockroom
//!
//! This crate provides persistent storage for the inventory core: user
//! credentials and product records in SQLite, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Front end (add product button, login form, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockroom-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────────────────────────────────────────────┐ │   │
//! │  │   │            InventoryService (service.rs)                 │ │   │
//! │  │   │   lifecycle • validation • routing                       │ │   │
//! │  │   └───────────────┬──────────────────────────┬───────────────┘ │   │
//! │  │                   ▼                          ▼                 │   │
//! │  │   ┌───────────────────┐        ┌───────────────────────┐      │   │
//! │  │   │  UserRepository   │        │  ProductRepository    │      │   │
//! │  │   └─────────┬─────────┘        └───────────┬───────────┘      │   │
//! │  │             └──────────────┬───────────────┘                  │   │
//! │  │                            ▼                                   │   │
//! │  │   ┌───────────────┐    ┌──────────────┐                       │   │
//! │  │   │   Database    │    │  Migrations  │                       │   │
//! │  │   │   (pool.rs)   │    │  (embedded)  │                       │   │
//! │  │   └───────────────┘    └──────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (users, products)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`service`] - InventoryService, the public entry point
//! - [`pool`] - Connection pool management
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Repository implementations (user, product)
//! - [`config`] - InventoryConfig and environment loading
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{InventoryConfig, InventoryService};
//!
//! let service = InventoryService::new(InventoryConfig::default());
//! service.initialize().await?;
//!
//! let id = service.add_product("Widget", 10, 2.50).await?;
//! let low = service.low_stock(Some(5)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, InventoryConfig};
pub use error::{DbError, DbResult, ErrorCode, InventoryError, InventoryResult};
pub use pool::{Database, DbConfig};
pub use service::{InventoryService, LifecycleState};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
