use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::PaginatedResponse,
    dto::matches::{CreateMatchRequest, MatchDetailResponse, MatchFilter, UpdateMatchRequest},
    models::{Match, MatchStatus},
    services::access::Principal,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches",
    params(MatchFilter),
    responses(
        (status = 200, description = "List matches, most recent first", body = PaginatedResponse<Match>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "matches"
)]
pub async fn list_matches(
    State(db): State<Database>,
    Query(filter): Query<MatchFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (matches, total) = services::list_matches(db.pool(), &filter).await?;

    Ok(Json(PaginatedResponse::new(matches, filter.pagination(), total)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    responses(
        (status = 200, description = "Match found", body = Match),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let game = services::get_match(db.pool(), id).await?;

    Ok(Json(game).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}/detailed",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    responses(
        (status = 200, description = "Match with both teams and its event timeline", body = MatchDetailResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match_detailed(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let game = services::get_match_detailed(db.pool(), id).await?;

    Ok(Json(game).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Match scheduled", body = Match),
        (status = 400, description = "Validation error, unknown team or sport mismatch"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "matches"
)]
pub async fn create_match(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_teams()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let game = services::create_match(db.pool(), &principal, &req).await?;

    Ok((StatusCode::CREATED, Json(game)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    request_body = UpdateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match updated", body = Match),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Status transition not allowed")
    ),
    tag = "matches"
)]
pub async fn update_match(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let game = services::update_match(db.pool(), &principal, id, &req).await?;

    Ok(Json(game).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{id}/start",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match is now LIVE", body = Match),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match already finished")
    ),
    tag = "matches"
)]
pub async fn start_match(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let game = services::change_status(db.pool(), &principal, id, MatchStatus::Live).await?;

    Ok(Json(game).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{id}/finish",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match is now FINISHED", body = Match),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn finish_match(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let game = services::change_status(db.pool(), &principal, id, MatchStatus::Finished).await?;

    Ok(Json(game).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Match and its events deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn delete_match(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_match(db.pool(), &principal, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
