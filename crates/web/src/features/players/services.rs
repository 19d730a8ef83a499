use sqlx::PgPool;
use storage::{
    dto::player::{
        CreatePlayerRequest, CreatePlayersRequest, PlayerFilter, PlayerStats, UpdatePlayerRequest,
    },
    error::StorageError,
    models::Player,
    repository::{player::PlayerRepository, team::TeamRepository},
    services::access::{Action, Principal, Resource, authorize},
};
use uuid::Uuid;

use crate::error::WebResult;

/// Player permissions follow the team (and so the club) they play for
async fn team_resource(pool: &PgPool, team_id: Uuid) -> WebResult<Resource> {
    let scope = TeamRepository::new(pool)
        .find_scope(team_id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => StorageError::Invalid("Team does not exist".to_string()),
            other => other,
        })?;

    Ok(Resource::Player {
        league_id: scope.league_id,
        club_id: scope.club_id,
    })
}

pub async fn list_players(pool: &PgPool, filter: &PlayerFilter) -> WebResult<(Vec<Player>, i64)> {
    Ok(PlayerRepository::new(pool).list(filter).await?)
}

pub async fn get_player(pool: &PgPool, id: Uuid) -> WebResult<Player> {
    Ok(PlayerRepository::new(pool).find_by_id(id).await?)
}

pub async fn get_player_stats(pool: &PgPool, id: Uuid) -> WebResult<PlayerStats> {
    Ok(PlayerRepository::new(pool).stats(id).await?)
}

pub async fn create_player(
    pool: &PgPool,
    principal: &Principal,
    req: &CreatePlayerRequest,
) -> WebResult<Player> {
    authorize(principal, Action::Create, &team_resource(pool, req.team_id).await?)?;

    Ok(PlayerRepository::new(pool).create(req).await?)
}

pub async fn create_players(
    pool: &PgPool,
    principal: &Principal,
    req: &CreatePlayersRequest,
) -> WebResult<Vec<Player>> {
    authorize(principal, Action::Create, &team_resource(pool, req.team_id).await?)?;

    Ok(PlayerRepository::new(pool).create_many(req).await?)
}

pub async fn update_player(
    pool: &PgPool,
    principal: &Principal,
    id: Uuid,
    req: &UpdatePlayerRequest,
) -> WebResult<Player> {
    let repo = PlayerRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    authorize(principal, Action::Update, &team_resource(pool, existing.team_id).await?)?;

    // A transfer also needs rights over the receiving team
    if let Some(team_id) = req.team_id
        && team_id != existing.team_id
    {
        authorize(principal, Action::Update, &team_resource(pool, team_id).await?)?;
    }

    Ok(repo.update(&existing, req).await?)
}

pub async fn delete_player(pool: &PgPool, principal: &Principal, id: Uuid) -> WebResult<()> {
    let repo = PlayerRepository::new(pool);
    let player = repo.find_by_id(id).await?;

    authorize(principal, Action::Delete, &team_resource(pool, player.team_id).await?)?;

    Ok(repo.delete(id).await?)
}
