use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::team::{CreateTeamRequest, TeamFilter, UpdateTeamRequest};
use crate::error::{Result, StorageError};
use crate::models::Team;

const UNKNOWN_CLUB: &str = "Club does not exist";

/// Where a team sits in the club/league hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct TeamScope {
    pub team_id: Uuid,
    pub club_id: Uuid,
    pub league_id: Option<Uuid>,
}

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &TeamFilter) {
    if let Some(club_id) = filter.club_id {
        query.push(" AND club_id = ");
        query.push_bind(club_id);
    }
    if let Some(sport) = filter.sport {
        query.push(" AND sport = ");
        query.push_bind(sport);
    }
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &TeamFilter) -> Result<(Vec<Team>, i64)> {
        let page = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM teams WHERE 1=1");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query =
            QueryBuilder::new("SELECT team_id, name, sport, club_id FROM teams WHERE 1=1");
        push_filters(&mut query, filter);
        query.push(" ORDER BY name, team_id LIMIT ");
        query.push_bind(page.limit());
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let teams = query.build_query_as::<Team>().fetch_all(self.pool).await?;

        Ok((teams, total))
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            "SELECT team_id, name, sport, club_id FROM teams WHERE team_id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(team)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Team> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    /// Fetch several teams at once, in no particular order
    pub async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            "SELECT team_id, name, sport, club_id FROM teams WHERE team_id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn find_scope(&self, id: Uuid) -> Result<TeamScope> {
        sqlx::query_as::<_, TeamScope>(
            r#"
            SELECT t.team_id, t.club_id, c.league_id
            FROM teams t
            JOIN clubs c ON c.club_id = t.club_id
            WHERE t.team_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn has_matches(&self, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM matches WHERE home_team_id = $1 OR away_team_id = $1)",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, sport, club_id)
            VALUES ($1, $2, $3)
            RETURNING team_id, name, sport, club_id
            "#,
        )
        .bind(&req.name)
        .bind(req.sport)
        .bind(req.club_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, UNKNOWN_CLUB, UNKNOWN_CLUB))?;

        tracing::info!(team_id = %team.team_id, club_id = %team.club_id, "Team created");
        Ok(team)
    }

    pub async fn update(&self, existing: &Team, req: &UpdateTeamRequest) -> Result<Team> {
        if let Some(sport) = req.sport
            && sport != existing.sport
            && self.has_matches(existing.team_id).await?
        {
            return Err(StorageError::InvalidState(
                "Cannot change the sport of a team that already has matches".to_string(),
            ));
        }

        sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = $2, sport = $3
            WHERE team_id = $1
            RETURNING team_id, name, sport, club_id
            "#,
        )
        .bind(existing.team_id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.sport.unwrap_or(existing.sport))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM teams WHERE team_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let e = StorageError::from(e);
                if e.is_foreign_key_violation() {
                    StorageError::ConstraintViolation("Team still has matches".to_string())
                } else {
                    e
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!(team_id = %id, "Team deleted");
        Ok(())
    }
}
