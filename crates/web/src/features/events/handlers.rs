use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database, dto::event::CreateEventRequest, models::Event, services::access::Principal,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches/{id}/events",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    responses(
        (status = 200, description = "Event timeline ordered by quarter and minute", body = Vec<Event>),
        (status = 404, description = "Match not found")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(db): State<Database>,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let events = services::list_events(db.pool(), match_id).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{id}/events",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event recorded and score updated", body = Event),
        (status = 400, description = "Event not allowed for this sport, or player not in the match"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match is not live")
    ),
    tag = "events"
)]
pub async fn record_event(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let event = services::record_event(db.pool(), &principal, match_id, &req).await?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Event removed and score adjusted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Match is not live")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_event(db.pool(), &principal, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
