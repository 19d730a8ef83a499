use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::EventType;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(range(min = 0, max = 200, message = "Minute must be between 0 and 200"))]
    pub minute: Option<i32>,

    #[validate(range(min = 1, max = 10, message = "Quarter must be between 1 and 10"))]
    pub quarter: Option<i32>,

    pub event_type: EventType,

    /// Free-form annotation; does not affect the score
    pub value: Option<i32>,

    pub player_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_and_quarter_ranges() {
        let req = CreateEventRequest {
            minute: Some(45),
            quarter: Some(2),
            event_type: EventType::Gol,
            value: None,
            player_id: None,
        };
        assert!(req.validate().is_ok());

        let req = CreateEventRequest {
            minute: Some(201),
            quarter: Some(0),
            ..req
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("minute"));
        assert!(errors.field_errors().contains_key("quarter"));
    }
}
