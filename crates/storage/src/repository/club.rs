use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::club::{ClubFilter, CreateClubRequest, UpdateClubRequest};
use crate::error::{Result, StorageError};
use crate::models::Club;

const SLUG_TAKEN: &str = "Slug already exists";
const UNKNOWN_LEAGUE: &str = "League does not exist";

pub struct ClubRepository<'a> {
    pool: &'a PgPool,
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ClubFilter) {
    if let Some(league_id) = filter.league_id {
        query.push(" AND league_id = ");
        query.push_bind(league_id);
    }
}

impl<'a> ClubRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &ClubFilter) -> Result<(Vec<Club>, i64)> {
        let page = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM clubs WHERE 1=1");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(
            "SELECT club_id, name, slug, logo_url, description, league_id FROM clubs WHERE 1=1",
        );
        push_filters(&mut query, filter);
        query.push(" ORDER BY name, slug LIMIT ");
        query.push_bind(page.limit());
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let clubs = query.build_query_as::<Club>().fetch_all(self.pool).await?;

        Ok((clubs, total))
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            SELECT club_id, name, slug, logo_url, description, league_id
            FROM clubs
            WHERE club_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(club)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Club> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Club> {
        sqlx::query_as::<_, Club>(
            r#"
            SELECT club_id, name, slug, logo_url, description, league_id
            FROM clubs
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateClubRequest) -> Result<Club> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            INSERT INTO clubs (name, slug, logo_url, description, league_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING club_id, name, slug, logo_url, description, league_id
            "#,
        )
        .bind(&req.name)
        .bind(&req.slug)
        .bind(&req.logo_url)
        .bind(&req.description)
        .bind(req.league_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, SLUG_TAKEN, UNKNOWN_LEAGUE))?;

        tracing::info!(club_id = %club.club_id, slug = %club.slug, "Club created");
        Ok(club)
    }

    pub async fn update(&self, existing: &Club, req: &UpdateClubRequest) -> Result<Club> {
        sqlx::query_as::<_, Club>(
            r#"
            UPDATE clubs
            SET name = $2, slug = $3, logo_url = $4, description = $5, league_id = $6
            WHERE club_id = $1
            RETURNING club_id, name, slug, logo_url, description, league_id
            "#,
        )
        .bind(existing.club_id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.slug.as_ref().unwrap_or(&existing.slug))
        .bind(req.logo_url.as_ref().or(existing.logo_url.as_ref()))
        .bind(req.description.as_ref().or(existing.description.as_ref()))
        .bind(req.league_id.or(existing.league_id))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, SLUG_TAKEN, UNKNOWN_LEAGUE))?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM clubs WHERE club_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let e = StorageError::from(e);
                if e.is_foreign_key_violation() {
                    StorageError::ConstraintViolation("Club still has admin users or teams with matches".to_string())
                } else {
                    e
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!(club_id = %id, "Club deleted");
        Ok(())
    }
}
