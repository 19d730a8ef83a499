use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::validate_slug;
use crate::models::Sport;

/// Request payload for creating a new league
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLeagueRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 255), custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Request payload for updating a league; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLeagueRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StandingsQuery {
    pub sport: Sport,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScorersQuery {
    pub sport: Option<Sport>,
    /// Number of players to return (1-100, default 20)
    pub limit: Option<u32>,
}

pub const DEFAULT_SCORERS_LIMIT: u32 = 20;

impl ScorersQuery {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_SCORERS_LIMIT)
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.limit() {
            1..=100 => Ok(()),
            _ => Err("limit must be between 1 and 100".to_string()),
        }
    }
}

/// One row of a league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StandingRow {
    pub position: u32,
    pub team_id: Uuid,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub scored: i64,
    pub conceded: i64,
    pub difference: i64,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopScorerEntry {
    pub rank: i64,
    pub player_id: Uuid,
    pub player_name: String,
    pub dorsal: Option<i32>,
    pub team_id: Uuid,
    pub team_name: String,
    pub points: i64,
    pub scoring_events: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_league_validation() {
        let req = CreateLeagueRequest {
            name: "Liga Norte".to_string(),
            slug: "liga-norte".to_string(),
            logo_url: Some("https://example.com/logo.png".to_string()),
            description: None,
        };
        assert!(req.validate().is_ok());

        let bad = CreateLeagueRequest {
            slug: "Liga Norte".to_string(),
            logo_url: Some("not a url".to_string()),
            ..req
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("slug"));
        assert!(fields.contains_key("logo_url"));
    }

    #[test]
    fn test_scorers_limit_bounds() {
        let query = ScorersQuery {
            sport: None,
            limit: None,
        };
        assert_eq!(query.limit(), DEFAULT_SCORERS_LIMIT);
        assert!(query.validate().is_ok());

        let query = ScorersQuery {
            sport: None,
            limit: Some(0),
        };
        assert!(query.validate().is_err());
    }
}
