use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{PaginationParams, validate_slug};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClubRequest {
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

    pub league_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClubRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub league_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClubFilter {
    pub league_id: Option<Uuid>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ClubFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page, self.page_size)
    }
}
