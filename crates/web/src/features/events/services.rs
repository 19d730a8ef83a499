use sqlx::PgPool;
use storage::{
    dto::event::CreateEventRequest,
    models::Event,
    repository::{event::EventRepository, matches::MatchRepository},
    services::access::{Action, Principal, Resource, authorize},
};
use uuid::Uuid;

use crate::error::WebResult;

async fn authorize_match(
    pool: &PgPool,
    principal: &Principal,
    action: Action,
    match_id: Uuid,
) -> WebResult<()> {
    let game = MatchRepository::new(pool).find_by_id(match_id).await?;
    authorize(
        principal,
        action,
        &Resource::Event {
            league_id: game.league_id,
        },
    )?;
    Ok(())
}

pub async fn list_events(pool: &PgPool, match_id: Uuid) -> WebResult<Vec<Event>> {
    // 404 for an unknown match rather than an empty timeline
    MatchRepository::new(pool).find_by_id(match_id).await?;

    Ok(EventRepository::new(pool).list_for_match(match_id).await?)
}

pub async fn record_event(
    pool: &PgPool,
    principal: &Principal,
    match_id: Uuid,
    req: &CreateEventRequest,
) -> WebResult<Event> {
    authorize_match(pool, principal, Action::Create, match_id).await?;

    Ok(EventRepository::new(pool).record(match_id, req).await?)
}

pub async fn delete_event(pool: &PgPool, principal: &Principal, id: Uuid) -> WebResult<Event> {
    let repo = EventRepository::new(pool);
    let event = repo.find_by_id(id).await?;
    authorize_match(pool, principal, Action::Delete, event.match_id).await?;

    Ok(repo.delete(id).await?)
}
