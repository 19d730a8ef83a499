use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{PaginatedResponse, PaginationParams},
    dto::league::{
        CreateLeagueRequest, ScorersQuery, StandingRow, StandingsQuery, TopScorerEntry,
        UpdateLeagueRequest,
    },
    models::League,
    services::access::Principal,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leagues",
    params(PaginationParams),
    responses(
        (status = 200, description = "List leagues", body = PaginatedResponse<League>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "leagues"
)]
pub async fn list_leagues(
    State(db): State<Database>,
    Query(page): Query<PaginationParams>,
) -> Result<Response, WebError> {
    page.validate().map_err(WebError::BadRequest)?;

    let (leagues, total) = services::list_leagues(db.pool(), page).await?;

    Ok(Json(PaginatedResponse::new(leagues, page, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leagues/{slug}",
    params(
        ("slug" = String, Path, description = "League slug")
    ),
    responses(
        (status = 200, description = "League found", body = League),
        (status = 404, description = "League not found")
    ),
    tag = "leagues"
)]
pub async fn get_league(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let league = services::get_league_by_slug(db.pool(), &slug).await?;

    Ok(Json(league).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leagues/{slug}/standings",
    params(
        ("slug" = String, Path, description = "League slug"),
        StandingsQuery
    ),
    responses(
        (status = 200, description = "League table computed from finished matches", body = Vec<StandingRow>),
        (status = 404, description = "League not found")
    ),
    tag = "leagues"
)]
pub async fn get_standings(
    State(db): State<Database>,
    Path(slug): Path<String>,
    Query(query): Query<StandingsQuery>,
) -> Result<Response, WebError> {
    let table = services::get_standings(db.pool(), &slug, query.sport).await?;

    Ok(Json(table).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leagues/{slug}/scorers",
    params(
        ("slug" = String, Path, description = "League slug"),
        ScorersQuery
    ),
    responses(
        (status = 200, description = "Players ranked by points scored", body = Vec<TopScorerEntry>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "League not found")
    ),
    tag = "leagues"
)]
pub async fn get_top_scorers(
    State(db): State<Database>,
    Path(slug): Path<String>,
    Query(query): Query<ScorersQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let scorers =
        services::get_top_scorers(db.pool(), &slug, query.sport, query.limit()).await?;

    Ok(Json(scorers).into_response())
}

#[utoipa::path(
    post,
    path = "/api/leagues",
    request_body = CreateLeagueRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "League created", body = League),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "leagues"
)]
pub async fn create_league(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateLeagueRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let league = services::create_league(db.pool(), &principal, &req).await?;

    Ok((StatusCode::CREATED, Json(league)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/leagues/{slug}",
    params(
        ("slug" = String, Path, description = "League slug")
    ),
    request_body = UpdateLeagueRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "League updated", body = League),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "League not found"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "leagues"
)]
pub async fn update_league(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
    Json(req): Json<UpdateLeagueRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let league = services::update_league(db.pool(), &principal, &slug, &req).await?;

    Ok(Json(league).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/leagues/{slug}",
    params(
        ("slug" = String, Path, description = "League slug")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "League deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "League not found"),
        (status = 409, description = "League still has admin users")
    ),
    tag = "leagues"
)]
pub async fn delete_league(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    services::delete_league(db.pool(), &principal, &slug).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
