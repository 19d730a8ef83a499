use sqlx::PgPool;
use storage::{
    dto::team::{CreateTeamRequest, TeamFilter, UpdateTeamRequest},
    error::StorageError,
    models::Team,
    repository::{
        club::ClubRepository,
        team::{TeamRepository, TeamScope},
    },
    services::access::{Action, Principal, Resource, authorize},
};
use uuid::Uuid;

use crate::error::WebResult;

fn resource(scope: &TeamScope) -> Resource {
    Resource::Team {
        league_id: scope.league_id,
        club_id: scope.club_id,
    }
}

pub async fn list_teams(pool: &PgPool, filter: &TeamFilter) -> WebResult<(Vec<Team>, i64)> {
    Ok(TeamRepository::new(pool).list(filter).await?)
}

pub async fn get_team(pool: &PgPool, id: Uuid) -> WebResult<Team> {
    Ok(TeamRepository::new(pool).find_by_id(id).await?)
}

pub async fn create_team(
    pool: &PgPool,
    principal: &Principal,
    req: &CreateTeamRequest,
) -> WebResult<Team> {
    let club = ClubRepository::new(pool)
        .find_optional(req.club_id)
        .await?
        .ok_or_else(|| StorageError::Invalid("Club does not exist".to_string()))?;

    authorize(
        principal,
        Action::Create,
        &Resource::Team {
            league_id: club.league_id,
            club_id: club.club_id,
        },
    )?;

    Ok(TeamRepository::new(pool).create(req).await?)
}

pub async fn update_team(
    pool: &PgPool,
    principal: &Principal,
    id: Uuid,
    req: &UpdateTeamRequest,
) -> WebResult<Team> {
    let repo = TeamRepository::new(pool);
    authorize(principal, Action::Update, &resource(&repo.find_scope(id).await?))?;

    let existing = repo.find_by_id(id).await?;
    Ok(repo.update(&existing, req).await?)
}

pub async fn delete_team(pool: &PgPool, principal: &Principal, id: Uuid) -> WebResult<()> {
    let repo = TeamRepository::new(pool);
    authorize(principal, Action::Delete, &resource(&repo.find_scope(id).await?))?;

    Ok(repo.delete(id).await?)
}
