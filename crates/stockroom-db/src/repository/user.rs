//! # User Repository
//!
//! Storage for usernames and password hashes.
//!
//! Hashing happens before this layer; the repository only ever sees the
//! PHC string and never logs it.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::{User, UserId};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user.
    ///
    /// ## Returns
    /// * `Ok(UserId)` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Username already taken; the
    ///   existing row is left untouched
    pub async fn insert(&self, username: &str, password_hash: &str) -> DbResult<UserId> {
        debug!(username = %username, "Inserting user");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, username),
            other => other,
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Gets a user by exact (case-sensitive) username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Counts registered users (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
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
    use crate::pool::{Database, DbConfig};

    async fn repo() -> UserRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.run_migrations().await.unwrap();
        db.users()
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = repo().await;
        let id = repo.insert("alice", "$argon2id$fake").await.unwrap();

        let user = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.password_hash, "$argon2id$fake");
        assert!(repo.get_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_unique_violation() {
        let repo = repo().await;
        repo.insert("alice", "first").await.unwrap();

        let err = repo.insert("alice", "second").await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "users.username");
                assert_eq!(value, "alice");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }

        assert_eq!(repo.count().await.unwrap(), 1);
        let user = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "first");
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let repo = repo().await;
        repo.insert("alice", "a").await.unwrap();
        repo.insert("Alice", "b").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
