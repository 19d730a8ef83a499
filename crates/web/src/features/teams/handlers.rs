use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::PaginatedResponse,
    dto::team::{CreateTeamRequest, TeamFilter, UpdateTeamRequest},
    models::Team,
    services::access::Principal,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/teams",
    params(TeamFilter),
    responses(
        (status = 200, description = "List teams", body = PaginatedResponse<Team>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "teams"
)]
pub async fn list_teams(
    State(db): State<Database>,
    Query(filter): Query<TeamFilter>,
) -> Result<Response, WebError> {
    let page = filter.pagination();
    page.validate().map_err(WebError::BadRequest)?;

    let (teams, total) = services::list_teams(db.pool(), &filter).await?;

    Ok(Json(PaginatedResponse::new(teams, page, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(
        ("id" = Uuid, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team found", body = Team),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let team = services::get_team(db.pool(), id).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Validation error or unknown club"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::create_team(db.pool(), &principal, &req).await?;

    Ok((StatusCode::CREATED, Json(team)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(
        ("id" = Uuid, Path, description = "Team ID")
    ),
    request_body = UpdateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Sport cannot change once the team has matches")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::update_team(db.pool(), &principal, id, &req).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(
        ("id" = Uuid, Path, description = "Team ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Team still has matches")
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_team(db.pool(), &principal, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
