use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::dto::matches::{CreateMatchRequest, MatchDetailResponse, MatchFilter, UpdateMatchRequest};
use crate::error::{Result, StorageError};
use crate::models::{Match, MatchStatus, Team};
use crate::repository::event::EventRepository;
use crate::repository::team::TeamRepository;
use crate::services::match_rules;

const MATCH_COLUMNS: &str = "match_id, league_id, sport, date, location, home_team_id, \
    away_team_id, status, score_home, score_away, created_at, updated_at";

/// Repository for Match database operations
pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &MatchFilter) {
    if let Some(league_id) = filter.league_id {
        query.push(" AND league_id = ");
        query.push_bind(league_id);
    }
    if let Some(team_id) = filter.team_id {
        query.push(" AND (home_team_id = ");
        query.push_bind(team_id);
        query.push(" OR away_team_id = ");
        query.push_bind(team_id);
        query.push(")");
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }
    if let Some(sport) = filter.sport {
        query.push(" AND sport = ");
        query.push_bind(sport);
    }
    if let Some(from) = filter.from {
        query.push(" AND date >= ");
        query.push_bind(from);
    }
    if let Some(to) = filter.to {
        query.push(" AND date <= ");
        query.push_bind(to);
    }
}

/// Both teams must exist, differ, and play the match's sport.
fn check_teams(req: &CreateMatchRequest, home: &Team, away: &Team) -> Result<()> {
    req.validate_teams()
        .map_err(|e| StorageError::Invalid(e.to_string()))?;

    for team in [home, away] {
        if team.sport != req.sport {
            return Err(StorageError::Invalid(format!(
                "Team '{}' plays {}, not {}",
                team.name, team.sport, req.sport
            )));
        }
    }

    Ok(())
}

/// Split the two teams of a match into (home, away)
fn pick_sides(game: &Match, teams: Vec<Team>) -> Result<(Team, Team)> {
    let mut home = None;
    let mut away = None;
    for team in teams {
        if team.team_id == game.home_team_id {
            home = Some(team);
        } else if team.team_id == game.away_team_id {
            away = Some(team);
        }
    }

    match (home, away) {
        (Some(home), Some(away)) => Ok((home, away)),
        _ => Err(StorageError::NotFound),
    }
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List matches, most recent first
    pub async fn list(&self, filter: &MatchFilter) -> Result<(Vec<Match>, i64)> {
        let page = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM matches WHERE 1=1");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new("SELECT ");
        query.push(MATCH_COLUMNS);
        query.push(" FROM matches WHERE 1=1");
        push_filters(&mut query, filter);
        query.push(" ORDER BY date DESC, created_at DESC LIMIT ");
        query.push_bind(page.limit());
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let matches = query.build_query_as::<Match>().fetch_all(self.pool).await?;

        Ok((matches, total))
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Match>> {
        let game = sqlx::query_as::<_, Match>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE match_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(game)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Match> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    /// Match with both teams and the full event timeline
    pub async fn find_detailed(&self, id: Uuid) -> Result<MatchDetailResponse> {
        let game = self.find_by_id(id).await?;

        let teams = TeamRepository::new(self.pool)
            .find_many(&[game.home_team_id, game.away_team_id])
            .await?;
        let (home_team, away_team) = pick_sides(&game, teams)?;

        let events = EventRepository::new(self.pool).list_for_match(id).await?;

        Ok(MatchDetailResponse {
            game,
            home_team,
            away_team,
            events,
        })
    }

    pub async fn create(&self, req: &CreateMatchRequest) -> Result<Match> {
        let teams = TeamRepository::new(self.pool);
        let home = teams
            .find_optional(req.home_team_id)
            .await?
            .ok_or_else(|| StorageError::Invalid("Home team does not exist".to_string()))?;
        let away = teams
            .find_optional(req.away_team_id)
            .await?
            .ok_or_else(|| StorageError::Invalid("Away team does not exist".to_string()))?;

        check_teams(req, &home, &away)?;

        let game = sqlx::query_as::<_, Match>(&format!(
            r#"
            INSERT INTO matches (league_id, sport, date, location, home_team_id, away_team_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(req.league_id)
        .bind(req.sport)
        .bind(req.date)
        .bind(&req.location)
        .bind(req.home_team_id)
        .bind(req.away_team_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::map_constraints(e, "Match already exists", "League or team does not exist")
        })?;

        tracing::info!(
            match_id = %game.match_id,
            home = %home.name,
            away = %away.name,
            "Match scheduled"
        );
        Ok(game)
    }

    /// Lock the match row for the rest of the transaction
    pub(crate) async fn lock(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<Match> {
        sqlx::query_as::<_, Match>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE match_id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateMatchRequest) -> Result<Match> {
        let mut tx = self.pool.begin().await?;
        let existing = Self::lock(&mut tx, id).await?;

        let status = req.status.unwrap_or(existing.status);
        match_rules::check_transition(existing.status, status)?;

        let game = sqlx::query_as::<_, Match>(&format!(
            r#"
            UPDATE matches
            SET league_id = $2, date = $3, location = $4, status = $5,
                score_home = $6, score_away = $7, updated_at = NOW()
            WHERE match_id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.league_id.or(existing.league_id))
        .bind(req.date.unwrap_or(existing.date))
        .bind(req.location.as_ref().or(existing.location.as_ref()))
        .bind(status)
        .bind(req.score_home.unwrap_or(existing.score_home))
        .bind(req.score_away.unwrap_or(existing.score_away))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StorageError::map_constraints(e, "Match already exists", "League does not exist"))?;

        tx.commit().await?;

        if existing.status != game.status {
            tracing::info!(match_id = %id, from = %existing.status, to = %game.status, "Match status changed");
        }
        Ok(game)
    }

    /// Move a match to `status`, enforcing the lifecycle rules
    pub async fn set_status(&self, id: Uuid, status: MatchStatus) -> Result<Match> {
        self.update(
            id,
            &UpdateMatchRequest {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM matches WHERE match_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!(match_id = %id, "Match deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::Sport;

    fn team(sport: Sport) -> Team {
        Team {
            team_id: Uuid::new_v4(),
            name: "Equipo".to_string(),
            sport,
            club_id: Uuid::new_v4(),
        }
    }

    fn request(sport: Sport, home: &Team, away: &Team) -> CreateMatchRequest {
        CreateMatchRequest {
            league_id: None,
            sport,
            date: Utc::now(),
            location: None,
            home_team_id: home.team_id,
            away_team_id: away.team_id,
        }
    }

    #[test]
    fn test_teams_must_play_match_sport() {
        let home = team(Sport::Futbol);
        let away = team(Sport::Basquet);
        let err = check_teams(&request(Sport::Futbol, &home, &away), &home, &away).unwrap_err();
        assert!(matches!(err, StorageError::Invalid(msg) if msg.contains("BASQUET")));

        let away = team(Sport::Futbol);
        assert!(check_teams(&request(Sport::Futbol, &home, &away), &home, &away).is_ok());
    }

    #[test]
    fn test_team_cannot_play_itself() {
        let home = team(Sport::Hockey);
        let err = check_teams(&request(Sport::Hockey, &home, &home), &home, &home).unwrap_err();
        assert!(matches!(err, StorageError::Invalid(_)));
    }

    #[test]
    fn test_pick_sides_ignores_fetch_order() {
        let home = team(Sport::Futbol);
        let away = team(Sport::Futbol);
        let now = Utc::now();
        let game = Match {
            match_id: Uuid::new_v4(),
            league_id: None,
            sport: Sport::Futbol,
            date: now,
            location: None,
            home_team_id: home.team_id,
            away_team_id: away.team_id,
            status: MatchStatus::Scheduled,
            score_home: 0,
            score_away: 0,
            created_at: now,
            updated_at: now,
        };

        let (h, a) = pick_sides(&game, vec![away.clone(), home.clone()]).unwrap();
        assert_eq!(h.team_id, home.team_id);
        assert_eq!(a.team_id, away.team_id);

        let err = pick_sides(&game, vec![home]).unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
