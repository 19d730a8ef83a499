use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::club::{ClubFilter, CreateClubRequest, UpdateClubRequest},
    dto::common::PaginatedResponse,
    models::Club,
    services::access::Principal,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/clubs",
    params(ClubFilter),
    responses(
        (status = 200, description = "List clubs", body = PaginatedResponse<Club>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "clubs"
)]
pub async fn list_clubs(
    State(db): State<Database>,
    Query(filter): Query<ClubFilter>,
) -> Result<Response, WebError> {
    let page = filter.pagination();
    page.validate().map_err(WebError::BadRequest)?;

    let (clubs, total) = services::list_clubs(db.pool(), &filter).await?;

    Ok(Json(PaginatedResponse::new(clubs, page, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/clubs/{slug}",
    params(
        ("slug" = String, Path, description = "Club slug")
    ),
    responses(
        (status = 200, description = "Club found", body = Club),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn get_club(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let club = services::get_club_by_slug(db.pool(), &slug).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    post,
    path = "/api/clubs",
    request_body = CreateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Club created", body = Club),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "clubs"
)]
pub async fn create_club(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::create_club(db.pool(), &principal, &req).await?;

    Ok((StatusCode::CREATED, Json(club)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/clubs/{slug}",
    params(
        ("slug" = String, Path, description = "Club slug")
    ),
    request_body = UpdateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club updated", body = Club),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Club not found"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "clubs"
)]
pub async fn update_club(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
    Json(req): Json<UpdateClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::update_club(db.pool(), &principal, &slug, &req).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/clubs/{slug}",
    params(
        ("slug" = String, Path, description = "Club slug")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Club deleted along with its teams and players"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Club not found"),
        (status = 409, description = "Club still has admin users or teams with matches")
    ),
    tag = "clubs"
)]
pub async fn delete_club(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    services::delete_club(db.pool(), &principal, &slug).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
