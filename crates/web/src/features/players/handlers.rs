use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::PaginatedResponse,
    dto::player::{
        CreatePlayerRequest, CreatePlayersRequest, PlayerFilter, PlayerStats, UpdatePlayerRequest,
    },
    models::Player,
    services::access::Principal,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/players",
    params(PlayerFilter),
    responses(
        (status = 200, description = "List players", body = PaginatedResponse<Player>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "players"
)]
pub async fn list_players(
    State(db): State<Database>,
    Query(filter): Query<PlayerFilter>,
) -> Result<Response, WebError> {
    let page = filter.pagination();
    page.validate().map_err(WebError::BadRequest)?;

    let (players, total) = services::list_players(db.pool(), &filter).await?;

    Ok(Json(PaginatedResponse::new(players, page, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    responses(
        (status = 200, description = "Player found", body = Player),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let player = services::get_player(db.pool(), id).await?;

    Ok(Json(player).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{id}/stats",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    responses(
        (status = 200, description = "Event counts per type and points scored", body = PlayerStats),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player_stats(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let stats = services::get_player_stats(db.pool(), id).await?;

    Ok(Json(stats).into_response())
}

#[utoipa::path(
    post,
    path = "/api/players",
    request_body = CreatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Player created", body = Player),
        (status = 400, description = "Validation error or unknown team"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "players"
)]
pub async fn create_player(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = services::create_player(db.pool(), &principal, &req).await?;

    Ok((StatusCode::CREATED, Json(player)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/players/bulk",
    request_body = CreatePlayersRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Whole roster created", body = Vec<Player>),
        (status = 400, description = "Validation error, duplicate dorsal or unknown team"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "players"
)]
pub async fn create_players(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreatePlayersRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_dorsals().map_err(WebError::BadRequest)?;

    let players = services::create_players(db.pool(), &principal, &req).await?;

    Ok((StatusCode::CREATED, Json(players)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    request_body = UpdatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Player updated", body = Player),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn update_player(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = services::update_player(db.pool(), &principal, id, &req).await?;

    Ok(Json(player).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Player deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn delete_player(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_player(db.pool(), &principal, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
