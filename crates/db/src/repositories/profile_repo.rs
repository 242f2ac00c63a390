//! Repository for the `profiles` table.

use cfomatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile};

const COLUMNS: &str = "id, user_id, display_name, bio, phone, website, location, avatar_path, \
                       created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Create the empty profile that accompanies a new account.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        display_name: &str,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, display_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(display_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                display_name = COALESCE($2, display_name),
                bio = COALESCE($3, bio),
                phone = COALESCE($4, phone),
                website = COALESCE($5, website),
                location = COALESCE($6, location)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.display_name)
            .bind(&input.bio)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(&input.location)
            .fetch_optional(pool)
            .await
    }

    /// Point the profile at a newly uploaded avatar.
    pub async fn set_avatar(
        pool: &PgPool,
        user_id: DbId,
        avatar_path: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE profiles SET avatar_path = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(avatar_path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
