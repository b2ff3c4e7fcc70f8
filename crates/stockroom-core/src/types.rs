//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductDraft   │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  name           │   │  id (i64)       │       │
//! │  │  name           │   │  quantity       │   │  username       │       │
//! │  │  quantity       │   │  price          │   │  password_hash  │       │
//! │  │  price          │   │                 │   │  created_at     │       │
//! │  │  timestamps     │   │  (no id yet)    │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are SQLite rowids assigned on insert. They are never reused, even
//! after the record they named has been deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation;

/// Surrogate identifier of a product.
pub type ProductId = i64;

/// Surrogate identifier of a user.
pub type UserId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product record as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned on insert.
    pub id: ProductId,

    /// Display label.
    pub name: String,

    /// Units currently in stock.
    pub quantity: i64,

    /// Unit price.
    pub price: f64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product Draft
// =============================================================================

/// The caller-supplied fields of a product: what `add` inserts and what
/// `update` replaces wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl ProductDraft {
    /// Creates a new draft. Does not validate; call [`ProductDraft::validate`].
    pub fn new(name: impl Into<String>, quantity: i64, price: f64) -> Self {
        ProductDraft {
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Applies every product rule, returning the first violation.
    ///
    /// ## Rules
    /// - name: non-empty, at most 200 characters
    /// - quantity: not negative
    /// - price: finite, not negative
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_product_name(&self.name)?;
        validation::validate_quantity(self.quantity)?;
        validation::validate_price(self.price)?;
        Ok(())
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user.
///
/// Users are created once and never modified by this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,

    /// Globally unique login name.
    pub username: String,

    /// PHC-format Argon2 hash. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
