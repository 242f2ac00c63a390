//! Repository for the `cfos` table.

use cfomatch_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::models::cfo::{Cfo, CfoFilter, UpsertCfo};

const COLUMNS: &str = "id, user_id, headline, years_experience, skills, certifications, \
                       availability, region, remote_ok, monthly_fee_min, monthly_fee_max, \
                       created_at, updated_at";

/// Provides directory queries and owner upserts for CFOs.
pub struct CfoRepo;

impl CfoRepo {
    /// Create or replace the caller's CFO record.
    pub async fn upsert(pool: &PgPool, user_id: DbId, input: &UpsertCfo) -> Result<Cfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO cfos
                (user_id, headline, years_experience, skills, certifications, availability,
                 region, remote_ok, monthly_fee_min, monthly_fee_max)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (user_id) DO UPDATE SET
                headline = EXCLUDED.headline,
                years_experience = EXCLUDED.years_experience,
                skills = EXCLUDED.skills,
                certifications = EXCLUDED.certifications,
                availability = EXCLUDED.availability,
                region = EXCLUDED.region,
                remote_ok = EXCLUDED.remote_ok,
                monthly_fee_min = EXCLUDED.monthly_fee_min,
                monthly_fee_max = EXCLUDED.monthly_fee_max
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cfo>(&query)
            .bind(user_id)
            .bind(&input.headline)
            .bind(input.years_experience)
            .bind(&input.skills)
            .bind(&input.certifications)
            .bind(input.availability.as_str())
            .bind(&input.region)
            .bind(input.remote_ok)
            .bind(input.monthly_fee_min)
            .bind(input.monthly_fee_max)
            .fetch_one(pool)
            .await
    }

    /// Find a CFO by ID. CFOs of suspended accounts are hidden.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cfo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cfos
             WHERE id = $1
               AND user_id IN (SELECT id FROM users WHERE status = 'active')"
        );
        sqlx::query_as::<_, Cfo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Cfo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cfos WHERE user_id = $1");
        sqlx::query_as::<_, Cfo>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered, sorted, paginated directory listing.
    pub async fn search(
        pool: &PgPool,
        filter: &CfoFilter,
        pattern: Option<&str>,
    ) -> Result<(Vec<Cfo>, i64), sqlx::Error> {
        let page = filter.page_params();
        let sort = filter.sort.unwrap_or_default();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM cfos f");
        push_filters(&mut count, filter, pattern);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut rows = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM cfos f"));
        push_filters(&mut rows, filter, pattern);
        push_page(&mut rows, sort.order_by(), &page);
        let items = rows.build_query_as::<Cfo>().fetch_all(pool).await?;

        Ok((items, total))
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &CfoFilter, pattern: Option<&str>) {
    qb.push(" WHERE f.user_id IN (SELECT id FROM users WHERE status = 'active')");
    if let Some(skill) = &filter.skill {
        qb.push(" AND ").push_bind(skill.clone()).push(" = ANY(f.skills)");
    }
    if let Some(min) = filter.min_experience {
        qb.push(" AND f.years_experience >= ").push_bind(min);
    }
    if let Some(availability) = filter.availability {
        qb.push(" AND f.availability = ").push_bind(availability.as_str());
    }
    if let Some(region) = &filter.region {
        qb.push(" AND f.region = ").push_bind(region.clone());
    }
    if let Some(remote_ok) = filter.remote_ok {
        qb.push(" AND f.remote_ok = ").push_bind(remote_ok);
    }
    if let Some(pattern) = pattern {
        qb.push(" AND f.headline ILIKE ").push_bind(pattern.to_owned());
    }
}
