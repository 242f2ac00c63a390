//! Repository for the `users` table.

use cfomatch_core::roles::UserStatus;
use cfomatch_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::models::user::{AdminUserRow, CreateUser, User, UserListParams};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, user_type, status, \
                        last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, user_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.user_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Insert a new user together with its profile in one transaction.
    /// Neither row exists if either insert fails.
    pub async fn create_with_profile(
        pool: &PgPool,
        input: &CreateUser,
        display_name: &str,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, password_hash, user_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.user_type.as_str())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO profiles (user_id, display_name) VALUES ($1, $2)")
            .bind(user.id)
            .bind(display_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Emails are stored lowercased.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing with optional type/status filters.
    ///
    /// `pattern` is an already-escaped `ILIKE` pattern matched against email
    /// and display name.
    pub async fn list_for_admin(
        pool: &PgPool,
        params: &UserListParams,
        pattern: Option<&str>,
    ) -> Result<(Vec<AdminUserRow>, i64), sqlx::Error> {
        let page = params.page_params();

        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM users u LEFT JOIN profiles p ON p.user_id = u.id",
        );
        push_admin_filters(&mut count, params, pattern);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut rows = QueryBuilder::<Postgres>::new(
            "SELECT u.id, u.email, u.user_type, u.status, p.display_name, \
             u.last_login_at, u.created_at \
             FROM users u LEFT JOIN profiles p ON p.user_id = u.id",
        );
        push_admin_filters(&mut rows, params, pattern);
        push_page(&mut rows, "u.created_at DESC, u.id DESC", &page);
        let items = rows.build_query_as::<AdminUserRow>().fetch_all(pool).await?;

        Ok((items, total))
    }

    /// Set an account's moderation status. Returns `None` if no such user.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: UserStatus,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Increment the failed login counter and return the new value.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET failed_login_count = failed_login_count + 1
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Lock a user account until the specified timestamp. The failure
    /// counter starts over, so the next lock needs a fresh run of failures.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2, failed_login_count = 0 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear `locked_until`,
    /// and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}

fn push_admin_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    params: &UserListParams,
    pattern: Option<&str>,
) {
    qb.push(" WHERE TRUE");
    if let Some(user_type) = params.user_type {
        qb.push(" AND u.user_type = ").push_bind(user_type.as_str());
    }
    if let Some(status) = params.status {
        qb.push(" AND u.status = ").push_bind(status.as_str());
    }
    if let Some(pattern) = pattern {
        qb.push(" AND (u.email ILIKE ")
            .push_bind(pattern.to_owned())
            .push(" OR p.display_name ILIKE ")
            .push_bind(pattern.to_owned())
            .push(")");
    }
}
