use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::player::{
    CreatePlayerRequest, CreatePlayersRequest, EventTypeCount, PlayerFilter, PlayerStats,
    UpdatePlayerRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{EventType, Player};
use crate::services::match_rules;

const UNKNOWN_TEAM: &str = "Team does not exist";

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &PlayerFilter) {
    if let Some(team_id) = filter.team_id {
        query.push(" AND team_id = ");
        query.push_bind(team_id);
    }
}

#[derive(FromRow)]
struct EventCountRow {
    event_type: EventType,
    count: i64,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &PlayerFilter) -> Result<(Vec<Player>, i64)> {
        let page = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM players WHERE 1=1");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query =
            QueryBuilder::new("SELECT player_id, name, dorsal, team_id FROM players WHERE 1=1");
        push_filters(&mut query, filter);
        query.push(" ORDER BY dorsal NULLS LAST, name LIMIT ");
        query.push_bind(page.limit());
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let players = query.build_query_as::<Player>().fetch_all(self.pool).await?;

        Ok((players, total))
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            "SELECT player_id, name, dorsal, team_id FROM players WHERE player_id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(player)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Player> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreatePlayerRequest) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (name, dorsal, team_id)
            VALUES ($1, $2, $3)
            RETURNING player_id, name, dorsal, team_id
            "#,
        )
        .bind(&req.name)
        .bind(req.dorsal)
        .bind(req.team_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, UNKNOWN_TEAM, UNKNOWN_TEAM))?;

        Ok(player)
    }

    /// Insert a whole roster in one transaction
    pub async fn create_many(&self, req: &CreatePlayersRequest) -> Result<Vec<Player>> {
        let mut tx = self.pool.begin().await?;
        let mut players = Vec::with_capacity(req.players.len());

        for new_player in &req.players {
            let player = sqlx::query_as::<_, Player>(
                r#"
                INSERT INTO players (name, dorsal, team_id)
                VALUES ($1, $2, $3)
                RETURNING player_id, name, dorsal, team_id
                "#,
            )
            .bind(&new_player.name)
            .bind(new_player.dorsal)
            .bind(req.team_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| StorageError::map_constraints(e, UNKNOWN_TEAM, UNKNOWN_TEAM))?;

            players.push(player);
        }

        tx.commit().await?;

        tracing::info!(team_id = %req.team_id, count = players.len(), "Roster created");
        Ok(players)
    }

    pub async fn update(&self, existing: &Player, req: &UpdatePlayerRequest) -> Result<Player> {
        sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET name = $2, dorsal = $3, team_id = $4
            WHERE player_id = $1
            RETURNING player_id, name, dorsal, team_id
            "#,
        )
        .bind(existing.player_id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.dorsal.or(existing.dorsal))
        .bind(req.team_id.unwrap_or(existing.team_id))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::map_constraints(e, UNKNOWN_TEAM, UNKNOWN_TEAM))?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM players WHERE player_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Event counts per type for one player, plus the points they scored
    pub async fn stats(&self, id: Uuid) -> Result<PlayerStats> {
        let player = self.find_by_id(id).await?;

        let rows = sqlx::query_as::<_, EventCountRow>(
            r#"
            SELECT event_type, COUNT(*) AS count
            FROM events
            WHERE player_id = $1
            GROUP BY event_type
            ORDER BY event_type
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let points = rows
            .iter()
            .map(|row| i64::from(match_rules::points(row.event_type)) * row.count)
            .sum();

        Ok(PlayerStats {
            player_id: player.player_id,
            name: player.name,
            team_id: player.team_id,
            events: rows
                .into_iter()
                .map(|row| EventTypeCount {
                    event_type: row.event_type,
                    count: row.count,
                })
                .collect(),
            points,
        })
    }
}
