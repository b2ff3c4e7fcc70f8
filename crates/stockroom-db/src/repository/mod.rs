//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  InventoryService                                                      │
//! │       │                                                                 │
//! │       │  db.products().low_stock(5)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert(&self, draft)                                              │
//! │  ├── update(&self, id, draft)                                          │
//! │  ├── delete(&self, id)                                                 │
//! │  ├── list(&self)                                                       │
//! │  └── low_stock(&self, threshold)                                       │
//! │       │                                                                 │
//! │       │  One SQL statement per call                                    │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product catalog CRUD and low-stock query
//! - [`UserRepository`](user::UserRepository) - Credential storage

pub mod product;
pub mod user;
