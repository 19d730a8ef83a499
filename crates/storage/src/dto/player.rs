use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::PaginationParams;
use crate::models::EventType;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlayerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(range(min = 0, max = 99, message = "Dorsal must be between 0 and 99"))]
    pub dorsal: Option<i32>,

    pub team_id: Uuid,
}

/// A roster entry inside a bulk creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewPlayer {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(range(min = 0, max = 99, message = "Dorsal must be between 0 and 99"))]
    pub dorsal: Option<i32>,
}

/// Creates a whole roster for one team; either every player is inserted or none
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlayersRequest {
    pub team_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Between 1 and 100 players per request"))]
    #[validate(nested)]
    pub players: Vec<NewPlayer>,
}

impl CreatePlayersRequest {
    /// Dorsals must be unique within the batch.
    pub fn validate_dorsals(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for dorsal in self.players.iter().filter_map(|p| p.dorsal) {
            if !seen.insert(dorsal) {
                return Err(format!("Dorsal {dorsal} appears more than once"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 99, message = "Dorsal must be between 0 and 99"))]
    pub dorsal: Option<i32>,

    pub team_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlayerFilter {
    pub team_id: Option<Uuid>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PlayerFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventTypeCount {
    pub event_type: EventType,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerStats {
    pub player_id: Uuid,
    pub name: String,
    pub team_id: Uuid,
    pub events: Vec<EventTypeCount>,
    pub points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(dorsals: &[Option<i32>]) -> CreatePlayersRequest {
        CreatePlayersRequest {
            team_id: Uuid::new_v4(),
            players: dorsals
                .iter()
                .enumerate()
                .map(|(i, dorsal)| NewPlayer {
                    name: format!("Player {i}"),
                    dorsal: *dorsal,
                })
                .collect(),
        }
    }

    #[test]
    fn test_dorsal_range() {
        let req = CreatePlayerRequest {
            name: "Ana".to_string(),
            dorsal: Some(100),
            team_id: Uuid::new_v4(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_bulk_rejects_empty_and_nested_errors() {
        assert!(roster(&[]).validate().is_err());
        assert!(roster(&[Some(7), Some(120)]).validate().is_err());
        assert!(roster(&[Some(7), None, Some(10)]).validate().is_ok());
    }

    #[test]
    fn test_bulk_duplicate_dorsals() {
        assert!(roster(&[Some(7), None, None, Some(9)]).validate_dorsals().is_ok());
        let err = roster(&[Some(7), Some(7)]).validate_dorsals().unwrap_err();
        assert!(err.contains('7'));
    }
}
