//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate holds the inventory domain: product and user types, the
//! validation rules applied before anything reaches storage, and the
//! one-way password hashing used by the credential store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front end (CLI / desktop form, external)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             stockroom-db :: InventoryService                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐               │   │
//! │  │   │   types   │  │ validation │  │  password  │               │   │
//! │  │   │  Product  │  │   rules    │  │   Argon2   │               │   │
//! │  │   │   User    │  │   checks   │  │  hash/ver  │               │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductDraft, User)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`password`] - Salted one-way password hashing
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::ProductDraft;
//!
//! let draft = ProductDraft::new("Widget", 10, 2.50);
//! assert!(draft.validate().is_ok());
//!
//! let bad = ProductDraft::new("Widget", -1, 2.50);
//! assert!(bad.validate().is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod password;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity at or below which a product counts as low stock when the
/// caller does not supply a threshold.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a username, in characters.
pub const MAX_USERNAME_LEN: usize = 64;
