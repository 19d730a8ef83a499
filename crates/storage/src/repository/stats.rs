use std::collections::HashMap;

use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::league::{StandingRow, TopScorerEntry};
use crate::error::Result;
use crate::models::{League, MatchStatus, Sport};
use crate::services::standings::{self, MatchResult};

#[derive(FromRow)]
struct TeamName {
    team_id: Uuid,
    name: String,
}

#[derive(FromRow)]
struct ScorerRow {
    rank: i64,
    player_id: Uuid,
    player_name: String,
    dorsal: Option<i32>,
    team_id: Uuid,
    team_name: String,
    points: i64,
    scoring_events: i64,
}

/// Aggregations over a league's matches and events
pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// League table for one sport, built from finished matches
    pub async fn standings(&self, league: &League, sport: Sport) -> Result<Vec<StandingRow>> {
        let results = sqlx::query_as::<_, MatchResult>(
            r#"
            SELECT home_team_id, away_team_id, score_home, score_away
            FROM matches
            WHERE league_id = $1 AND sport = $2 AND status = $3
            "#,
        )
        .bind(league.league_id)
        .bind(sport)
        .bind(MatchStatus::Finished)
        .fetch_all(self.pool)
        .await?;

        let team_ids: Vec<Uuid> = results
            .iter()
            .flat_map(|r| [r.home_team_id, r.away_team_id])
            .collect();

        let names: HashMap<Uuid, String> = sqlx::query_as::<_, TeamName>(
            "SELECT team_id, name FROM teams WHERE team_id = ANY($1)",
        )
        .bind(&team_ids)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|t| (t.team_id, t.name))
        .collect();

        tracing::debug!(league = %league.slug, %sport, matches = results.len(), "Computing standings");
        Ok(standings::compute_standings(sport, &results, &names))
    }

    /// Players ranked by points scored in live and finished league matches
    pub async fn top_scorers(
        &self,
        league: &League,
        sport: Option<Sport>,
        limit: u32,
    ) -> Result<Vec<TopScorerEntry>> {
        let mut query = QueryBuilder::new(
            r#"
            WITH scoring AS (
                SELECT
                    e.player_id,
                    SUM(e.points_home + e.points_away)::BIGINT AS points,
                    COUNT(*) AS scoring_events
                FROM events e
                INNER JOIN matches m ON m.match_id = e.match_id
                WHERE e.player_id IS NOT NULL
                  AND e.points_home + e.points_away > 0
                  AND m.status <>
            "#,
        );
        query.push_bind(MatchStatus::Scheduled);
        query.push(" AND m.league_id = ");
        query.push_bind(league.league_id);

        if let Some(sport) = sport {
            query.push(" AND m.sport = ");
            query.push_bind(sport);
        }

        query.push(
            r#"
                GROUP BY e.player_id
            )
            SELECT
                ROW_NUMBER() OVER (ORDER BY s.points DESC, p.name ASC) AS rank,
                p.player_id,
                p.name AS player_name,
                p.dorsal,
                t.team_id,
                t.name AS team_name,
                s.points,
                s.scoring_events
            FROM scoring s
            INNER JOIN players p ON p.player_id = s.player_id
            INNER JOIN teams t ON t.team_id = p.team_id
            ORDER BY rank
            LIMIT
            "#,
        );
        query.push_bind(i64::from(limit));

        let rows: Vec<ScorerRow> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|row| TopScorerEntry {
                rank: row.rank,
                player_id: row.player_id,
                player_name: row.player_name,
                dorsal: row.dorsal,
                team_id: row.team_id,
                team_name: row.team_name,
                points: row.points,
                scoring_events: row.scoring_events,
            })
            .collect())
    }
}
