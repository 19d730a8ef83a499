use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::league::{CreateLeagueRequest, UpdateLeagueRequest};
use crate::error::{Result, StorageError};
use crate::models::League;

const SLUG_TAKEN: &str = "Slug already exists";

/// Repository for League database operations
pub struct LeagueRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeagueRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List leagues ordered by name, one page at a time
    pub async fn list(&self, page: PaginationParams) -> Result<(Vec<League>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leagues")
            .fetch_one(self.pool)
            .await?;

        let leagues = sqlx::query_as::<_, League>(
            r#"
            SELECT league_id, name, slug, logo_url, description
            FROM leagues
            ORDER BY name, slug
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((leagues, total))
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<League>> {
        let league = sqlx::query_as::<_, League>(
            r#"
            SELECT league_id, name, slug, logo_url, description
            FROM leagues
            WHERE league_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(league)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<League> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn find_by_slug_optional(&self, slug: &str) -> Result<Option<League>> {
        let league = sqlx::query_as::<_, League>(
            r#"
            SELECT league_id, name, slug, logo_url, description
            FROM leagues
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(league)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<League> {
        self.find_by_slug_optional(slug)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateLeagueRequest) -> Result<League> {
        let league = sqlx::query_as::<_, League>(
            r#"
            INSERT INTO leagues (name, slug, logo_url, description)
            VALUES ($1, $2, $3, $4)
            RETURNING league_id, name, slug, logo_url, description
            "#,
        )
        .bind(&req.name)
        .bind(&req.slug)
        .bind(&req.logo_url)
        .bind(&req.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, SLUG_TAKEN, SLUG_TAKEN))?;

        tracing::info!(league_id = %league.league_id, slug = %league.slug, "League created");
        Ok(league)
    }

    pub async fn update(
        &self,
        existing: &League,
        req: &UpdateLeagueRequest,
    ) -> Result<League> {
        let league = sqlx::query_as::<_, League>(
            r#"
            UPDATE leagues
            SET name = $2, slug = $3, logo_url = $4, description = $5
            WHERE league_id = $1
            RETURNING league_id, name, slug, logo_url, description
            "#,
        )
        .bind(existing.league_id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.slug.as_ref().unwrap_or(&existing.slug))
        .bind(req.logo_url.as_ref().or(existing.logo_url.as_ref()))
        .bind(req.description.as_ref().or(existing.description.as_ref()))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, SLUG_TAKEN, SLUG_TAKEN))?
        .ok_or(StorageError::NotFound)?;

        Ok(league)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM leagues WHERE league_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                StorageError::map_constraints(e, "League already exists", "League still has admin users")
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!(league_id = %id, "League deleted");
        Ok(())
    }
}
