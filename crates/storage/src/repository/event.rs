use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::event::CreateEventRequest;
use crate::error::{Result, StorageError};
use crate::models::{Event, Match};
use crate::repository::matches::MatchRepository;
use crate::services::match_rules::{self, ScoreDelta};

const EVENT_COLUMNS: &str = "event_id, match_id, minute, quarter, event_type, value, player_id, \
    points_home, points_away, created_at";

/// Timeline order; events without a quarter or minute go last.
const TIMELINE_ORDER: &str = "quarter NULLS LAST, minute NULLS LAST, created_at";

/// Repository for match events. Recording or removing an event keeps the
/// match score in step inside the same transaction.
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

async fn player_team(
    tx: &mut Transaction<'_, Postgres>,
    player_id: Option<Uuid>,
) -> Result<Option<Uuid>> {
    let Some(player_id) = player_id else {
        return Ok(None);
    };

    let team_id: Option<Uuid> =
        sqlx::query_scalar("SELECT team_id FROM players WHERE player_id = $1")
            .bind(player_id)
            .fetch_optional(&mut **tx)
            .await?;

    team_id
        .map(Some)
        .ok_or_else(|| StorageError::Invalid("Player does not exist".to_string()))
}

/// Write the score of the locked `game` after applying `delta`
async fn apply_delta(
    tx: &mut Transaction<'_, Postgres>,
    game: &Match,
    delta: ScoreDelta,
) -> Result<()> {
    if delta.is_zero() {
        return Ok(());
    }

    let (score_home, score_away) = delta.apply(game.score_home, game.score_away);

    sqlx::query(
        r#"
        UPDATE matches
        SET score_home = $2, score_away = $3, updated_at = NOW()
        WHERE match_id = $1
        "#,
    )
    .bind(game.match_id)
    .bind(score_home)
    .bind(score_away)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Timeline of a match: by quarter, then minute, then insertion order
    pub async fn list_for_match(&self, match_id: Uuid) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE match_id = $1
            ORDER BY {TIMELINE_ORDER}
            "#
        ))
        .bind(match_id)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(event)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn record(&self, match_id: Uuid, req: &CreateEventRequest) -> Result<Event> {
        let mut tx = self.pool.begin().await?;

        let game = MatchRepository::lock(&mut tx, match_id).await?;
        match_rules::ensure_live(&game)?;

        let team_id = player_team(&mut tx, req.player_id).await?;
        let delta = match_rules::score_delta(&game, req.event_type, team_id)?;

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events
                (match_id, minute, quarter, event_type, value, player_id, points_home, points_away)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(match_id)
        .bind(req.minute)
        .bind(req.quarter)
        .bind(req.event_type)
        .bind(req.value)
        .bind(req.player_id)
        .bind(delta.home)
        .bind(delta.away)
        .fetch_one(&mut *tx)
        .await?;

        apply_delta(&mut tx, &game, delta).await?;
        tx.commit().await?;

        tracing::info!(
            match_id = %match_id,
            event_id = %event.event_id,
            event_type = %event.event_type,
            home = delta.home,
            away = delta.away,
            "Event recorded"
        );
        Ok(event)
    }

    /// Remove an event from a live match, taking back the points it
    /// credited when it was recorded
    pub async fn delete(&self, id: Uuid) -> Result<Event> {
        let match_id = self.find_by_id(id).await?.match_id;

        let mut tx = self.pool.begin().await?;
        let game = MatchRepository::lock(&mut tx, match_id).await?;
        match_rules::ensure_live(&game)?;

        let event = sqlx::query_as::<_, Event>(&format!(
            "DELETE FROM events WHERE event_id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let delta = ScoreDelta::credited_by(&event).negate();
        apply_delta(&mut tx, &game, delta).await?;
        tx.commit().await?;

        tracing::info!(
            match_id = %event.match_id,
            event_id = %id,
            home = delta.home,
            away = delta.away,
            "Event removed"
        );
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_places_missing_quarter_and_minute_alike() {
        assert_eq!(TIMELINE_ORDER.matches("NULLS LAST").count(), 2);
        assert!(!TIMELINE_ORDER.contains("NULLS FIRST"));
        assert!(TIMELINE_ORDER.ends_with("created_at"));
    }

    #[test]
    fn test_event_columns_carry_credited_points() {
        assert!(EVENT_COLUMNS.contains("points_home"));
        assert!(EVENT_COLUMNS.contains("points_away"));
    }
}
