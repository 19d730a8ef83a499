use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{MatchStatus, Sport};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Match {
    pub match_id: Uuid,
    pub league_id: Option<Uuid>,
    pub sport: Sport,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub status: MatchStatus,
    pub score_home: i32,
    pub score_away: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which side of a match a team plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Match {
    pub fn side_of(&self, team_id: Uuid) -> Option<Side> {
        if team_id == self.home_team_id {
            Some(Side::Home)
        } else if team_id == self.away_team_id {
            Some(Side::Away)
        } else {
            None
        }
    }
}
