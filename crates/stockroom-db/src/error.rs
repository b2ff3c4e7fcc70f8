//! # Database Error Types
//!
//! Error types for database operations and for the service facade.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError ← Adds context and categorization                             │
//! │       │                                                                 │
//! │       │   ValidationError (stockroom-core)                             │
//! │       │        │                                                        │
//! │       ▼        ▼                                                        │
//! │  InventoryError ← What InventoryService callers see                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Front end shows user_message(), branches on code()                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockroom_core::{CoreError, ProductId, ValidationError};
use thiserror::Error;

// =============================================================================
// Database Error
// =============================================================================

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Registering a username that already exists
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// CHECK or NOT NULL constraint violation.
    ///
    /// Validation normally rejects these inputs first.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - File permissions issue
    /// - Pool was closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this is a unique-constraint failure.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database (UNIQUE)    → DbError::UniqueViolation
/// sqlx::Error::Database (CHECK/NN)  → DbError::ConstraintViolation
/// sqlx::Error::PoolTimedOut         → DbError::PoolExhausted
/// sqlx::Error::PoolClosed           → DbError::ConnectionFailed
/// Other                             → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                match db_err.kind() {
                    // SQLite reports "UNIQUE constraint failed: <table>.<column>"
                    sqlx::error::ErrorKind::UniqueViolation => {
                        let field = msg
                            .split("UNIQUE constraint failed: ")
                            .nth(1)
                            .unwrap_or("unknown")
                            .to_string();
                        DbError::UniqueViolation {
                            field,
                            value: "unknown".to_string(),
                        }
                    }
                    sqlx::error::ErrorKind::CheckViolation
                    | sqlx::error::ErrorKind::NotNullViolation => {
                        DbError::ConstraintViolation(msg.to_string())
                    }
                    _ => DbError::QueryFailed(msg.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Error Codes
// =============================================================================

/// Machine-readable error codes for front ends.
///
/// ## Usage in a front end
/// ```text
/// match err.code() {
///     NotInitialized  → show "store not opened" and retry startup
///     ValidationError → highlight the field named in user_message()
///     StorageError    → show message, keep the form contents
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotInitialized,
    ValidationError,
    StorageError,
    Internal,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE form, e.g. `NOT_INITIALIZED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotInitialized => "NOT_INITIALIZED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

// =============================================================================
// Inventory Error
// =============================================================================

/// Errors surfaced by [`crate::InventoryService`].
///
/// ## Taxonomy
/// - `NotInitialized` - a CRUD/query call arrived before `initialize()`
/// - `Validation` - out-of-range or empty input, names the field
/// - `Storage` - persistence unavailable or failed, never retried
/// - `Credentials` - the password hasher itself failed
/// - `InvalidProduct` / `ProductStorage` - the same two failures raised by
///   an update or delete, tagged with the product id
///
/// Duplicate usernames and missing product ids are not errors: the
/// first is `Ok(false)` from `register`, the second a silent no-op.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Inventory store is not initialized")]
    NotInitialized,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage failure: {0}")]
    Storage(#[from] DbError),

    #[error("Credential processing failed: {0}")]
    Credentials(String),

    #[error("Invalid input for product {id}: {source}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: ValidationError,
    },

    #[error("Storage failure for product {id}: {source}")]
    ProductStorage {
        id: ProductId,
        #[source]
        source: DbError,
    },
}

impl From<CoreError> for InventoryError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => InventoryError::Validation(e),
            CoreError::PasswordHash(msg) => InventoryError::Credentials(msg),
        }
    }
}

impl InventoryError {
    /// Tags validation and storage failures with the product they concern.
    /// Other variants pass through unchanged.
    pub fn for_product(id: ProductId, err: InventoryError) -> Self {
        match err {
            InventoryError::Validation(source) => InventoryError::InvalidProduct { id, source },
            InventoryError::Storage(source) => InventoryError::ProductStorage { id, source },
            other => other,
        }
    }

    /// The product id this failure concerns, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            InventoryError::InvalidProduct { id, .. }
            | InventoryError::ProductStorage { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// The offending field of a validation failure.
    pub fn field(&self) -> Option<&str> {
        match self {
            InventoryError::Validation(e) | InventoryError::InvalidProduct { source: e, .. } => {
                Some(e.field())
            }
            _ => None,
        }
    }

    /// Machine-readable code for front ends.
    pub fn code(&self) -> ErrorCode {
        match self {
            InventoryError::NotInitialized => ErrorCode::NotInitialized,
            InventoryError::Validation(_) | InventoryError::InvalidProduct { .. } => {
                ErrorCode::ValidationError
            }
            InventoryError::Storage(_) | InventoryError::ProductStorage { .. } => {
                ErrorCode::StorageError
            }
            InventoryError::Credentials(_) => ErrorCode::Internal,
        }
    }

    /// Display text that names the offending field but never exposes
    /// SQL, file paths or driver messages.
    pub fn user_message(&self) -> String {
        match self {
            InventoryError::NotInitialized => {
                "The inventory store has not been opened yet.".to_string()
            }
            InventoryError::Validation(e) => e.to_string(),
            InventoryError::Storage(DbError::PoolExhausted) => {
                "The inventory store is busy. Please try again.".to_string()
            }
            InventoryError::Storage(_) => {
                "The inventory store is unavailable. No changes were saved.".to_string()
            }
            InventoryError::Credentials(_) => {
                "Could not process credentials. Please try again.".to_string()
            }
            InventoryError::InvalidProduct { id, source } => format!("Product {id}: {source}"),
            InventoryError::ProductStorage {
                id,
                source: DbError::PoolExhausted,
            } => format!("The inventory store is busy. Product {id} was not changed."),
            InventoryError::ProductStorage { id, .. } => {
                format!("The inventory store is unavailable. Product {id} was not changed.")
            }
        }
    }
}

/// Result type for service operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_messages() {
        let err = DbError::duplicate("users.username", "alice");
        assert!(err.is_unique_violation());
        assert_eq!(
            err.to_string(),
            "Duplicate users.username: 'alice' already exists"
        );
    }

    #[test]
    fn test_pool_errors_map_to_connection_categories() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Internal(_)
        ));
    }

    #[test]
    fn test_inventory_error_codes() {
        assert_eq!(
            InventoryError::NotInitialized.code().as_str(),
            "NOT_INITIALIZED"
        );

        let err: InventoryError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.code().as_str(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "name is required");
    }

    #[test]
    fn test_error_code_serializes_like_as_str() {
        for code in [
            ErrorCode::NotInitialized,
            ErrorCode::ValidationError,
            ErrorCode::StorageError,
            ErrorCode::Internal,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_storage_message_hides_internals() {
        let err: InventoryError =
            DbError::QueryFailed("no such table: products".to_string()).into();
        assert_eq!(err.code().as_str(), "STORAGE_ERROR");
        assert!(!err.user_message().contains("products"));
        assert!(err.to_string().contains("no such table"));
    }

    #[test]
    fn test_core_error_conversion() {
        let err: InventoryError = CoreError::PasswordHash("rng".to_string()).into();
        assert!(matches!(err, InventoryError::Credentials(_)));
    }

    #[test]
    fn test_product_errors_name_the_id() {
        let err = InventoryError::for_product(
            7,
            ValidationError::Required {
                field: "name".to_string(),
            }
            .into(),
        );
        assert_eq!(err.product_id(), Some(7));
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.code().as_str(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "Product 7: name is required");

        let err = InventoryError::for_product(
            9,
            DbError::QueryFailed("disk I/O error at /var/db".to_string()).into(),
        );
        assert_eq!(err.code().as_str(), "STORAGE_ERROR");
        assert!(err.user_message().contains("Product 9"));
        assert!(!err.user_message().contains("/var/db"));

        let err = InventoryError::for_product(3, InventoryError::NotInitialized);
        assert!(matches!(err, InventoryError::NotInitialized));
        assert_eq!(err.product_id(), None);
    }
}
