use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::EventType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub match_id: Uuid,
    pub minute: Option<i32>,
    pub quarter: Option<i32>,
    pub event_type: EventType,
    pub value: Option<i32>,
    pub player_id: Option<Uuid>,
    /// Points this event credited to the home side when it was recorded
    pub points_home: i32,
    /// Points this event credited to the away side when it was recorded
    pub points_away: i32,
    pub created_at: DateTime<Utc>,
}
