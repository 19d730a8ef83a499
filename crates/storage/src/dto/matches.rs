use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::PaginationParams;
use crate::models::{Event, Match, MatchStatus, Sport, Team};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMatchRequest {
    pub league_id: Option<Uuid>,
    pub sport: Sport,
    pub date: DateTime<Utc>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

impl CreateMatchRequest {
    pub fn validate_teams(&self) -> Result<(), &'static str> {
        if self.home_team_id == self.away_team_id {
            return Err("Home and away teams must be different");
        }
        Ok(())
    }
}

/// Partial update. `status` goes through the same transition rules as the
/// start/finish endpoints; scores may be corrected by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMatchRequest {
    pub league_id: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub status: Option<MatchStatus>,

    #[validate(range(min = 0, message = "Scores cannot be negative"))]
    pub score_home: Option<i32>,

    #[validate(range(min = 0, message = "Scores cannot be negative"))]
    pub score_away: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchFilter {
    pub league_id: Option<Uuid>,
    /// Matches where this team plays home or away
    pub team_id: Option<Uuid>,
    pub status: Option<MatchStatus>,
    pub sport: Option<Sport>,
    /// Only matches on or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Only matches on or before this instant
    pub to: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl MatchFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page, self.page_size)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err("from must be before to".to_string());
        }

        Ok(())
    }
}

/// A match together with both teams and its event timeline
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchDetailResponse {
    #[serde(flatten)]
    pub game: Match,
    pub home_team: Team,
    pub away_team: Team,
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_same_team_rejected() {
        let team = Uuid::new_v4();
        let req = CreateMatchRequest {
            league_id: None,
            sport: Sport::Futbol,
            date: Utc::now(),
            location: None,
            home_team_id: team,
            away_team_id: team,
        };
        assert!(req.validate_teams().is_err());
    }

    #[test]
    fn test_negative_score_rejected() {
        let req = UpdateMatchRequest {
            score_home: Some(-1),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_filter_date_range() {
        let now = Utc::now();
        let filter = MatchFilter {
            from: Some(now),
            to: Some(now - Duration::days(1)),
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        let filter = MatchFilter {
            from: Some(now - Duration::days(1)),
            to: Some(now),
            ..Default::default()
        };
        assert!(filter.validate().is_ok());
    }
}
