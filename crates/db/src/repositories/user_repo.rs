//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, username, password_hash, role, created_at";

/// Provides insert and lookup operations for users. Rows are never updated
/// or deleted.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate username fails with a unique violation on
    /// `uq_users_username`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Insert a user unless the username is taken.
    ///
    /// Returns `true` if a row was inserted. Used for the seed accounts.
    pub async fn create_if_absent(pool: &PgPool, input: &CreateUser) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(&input.role)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username AND role. A role mismatch returns `None`,
    /// exactly like an unknown username.
    pub async fn find_by_username_and_role(
        pool: &PgPool,
        username: &str,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1 AND role = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Whether a username is already registered.
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await
    }
}
