//! Repository for the `companies` table.

use cfomatch_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::push_page;
use crate::models::company::{Company, CompanyFilter, UpsertCompany};

const COLUMNS: &str = "id, user_id, name, industry, revenue_range, employee_count, description, \
                       is_recruiting, recruiting_summary, desired_skills, created_at, updated_at";

/// Provides directory queries and owner upserts for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Create or replace the caller's company record.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertCompany,
    ) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies
                (user_id, name, industry, revenue_range, employee_count, description,
                 is_recruiting, recruiting_summary, desired_skills)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                industry = EXCLUDED.industry,
                revenue_range = EXCLUDED.revenue_range,
                employee_count = EXCLUDED.employee_count,
                description = EXCLUDED.description,
                is_recruiting = EXCLUDED.is_recruiting,
                recruiting_summary = EXCLUDED.recruiting_summary,
                desired_skills = EXCLUDED.desired_skills
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.industry)
            .bind(&input.revenue_range)
            .bind(input.employee_count)
            .bind(&input.description)
            .bind(input.is_recruiting)
            .bind(&input.recruiting_summary)
            .bind(&input.desired_skills)
            .fetch_one(pool)
            .await
    }

    /// Find a company by ID. Companies of suspended accounts are hidden.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies
             WHERE id = $1
               AND user_id IN (SELECT id FROM users WHERE status = 'active')"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE user_id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered, sorted, paginated directory listing.
    ///
    /// Returns the page of rows and the total matching count.
    pub async fn search(
        pool: &PgPool,
        filter: &CompanyFilter,
        pattern: Option<&str>,
    ) -> Result<(Vec<Company>, i64), sqlx::Error> {
        let page = filter.page_params();
        let sort = filter.sort.unwrap_or_default();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM companies c");
        push_filters(&mut count, filter, pattern);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut rows = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM companies c"));
        push_filters(&mut rows, filter, pattern);
        push_page(&mut rows, sort.order_by(), &page);
        let items = rows.build_query_as::<Company>().fetch_all(pool).await?;

        Ok((items, total))
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &CompanyFilter, pattern: Option<&str>) {
    qb.push(" WHERE c.user_id IN (SELECT id FROM users WHERE status = 'active')");
    if let Some(industry) = &filter.industry {
        qb.push(" AND c.industry = ").push_bind(industry.clone());
    }
    if let Some(revenue_range) = &filter.revenue_range {
        qb.push(" AND c.revenue_range = ").push_bind(revenue_range.clone());
    }
    if let Some(recruiting) = filter.recruiting {
        qb.push(" AND c.is_recruiting = ").push_bind(recruiting);
    }
    if let Some(pattern) = pattern {
        qb.push(" AND (c.name ILIKE ")
            .push_bind(pattern.to_owned())
            .push(" OR c.description ILIKE ")
            .push_bind(pattern.to_owned())
            .push(")");
    }
}
