use sqlx::PgPool;
use storage::{
    dto::matches::{CreateMatchRequest, MatchDetailResponse, MatchFilter, UpdateMatchRequest},
    models::{Match, MatchStatus},
    repository::matches::MatchRepository,
    services::access::{Action, Principal, Resource, authorize},
};
use uuid::Uuid;

use crate::error::WebResult;

async fn authorize_existing(
    repo: &MatchRepository<'_>,
    principal: &Principal,
    action: Action,
    id: Uuid,
) -> WebResult<Match> {
    let game = repo.find_by_id(id).await?;
    authorize(
        principal,
        action,
        &Resource::Match {
            league_id: game.league_id,
        },
    )?;
    Ok(game)
}

pub async fn list_matches(pool: &PgPool, filter: &MatchFilter) -> WebResult<(Vec<Match>, i64)> {
    Ok(MatchRepository::new(pool).list(filter).await?)
}

pub async fn get_match(pool: &PgPool, id: Uuid) -> WebResult<Match> {
    Ok(MatchRepository::new(pool).find_by_id(id).await?)
}

pub async fn get_match_detailed(pool: &PgPool, id: Uuid) -> WebResult<MatchDetailResponse> {
    Ok(MatchRepository::new(pool).find_detailed(id).await?)
}

pub async fn create_match(
    pool: &PgPool,
    principal: &Principal,
    req: &CreateMatchRequest,
) -> WebResult<Match> {
    authorize(
        principal,
        Action::Create,
        &Resource::Match {
            league_id: req.league_id,
        },
    )?;

    Ok(MatchRepository::new(pool).create(req).await?)
}

pub async fn update_match(
    pool: &PgPool,
    principal: &Principal,
    id: Uuid,
    req: &UpdateMatchRequest,
) -> WebResult<Match> {
    let repo = MatchRepository::new(pool);
    let existing = authorize_existing(&repo, principal, Action::Update, id).await?;

    if req.league_id.is_some() && req.league_id != existing.league_id {
        authorize(
            principal,
            Action::Update,
            &Resource::Match {
                league_id: req.league_id,
            },
        )?;
    }

    Ok(repo.update(id, req).await?)
}

pub async fn change_status(
    pool: &PgPool,
    principal: &Principal,
    id: Uuid,
    status: MatchStatus,
) -> WebResult<Match> {
    let repo = MatchRepository::new(pool);
    authorize_existing(&repo, principal, Action::Update, id).await?;

    Ok(repo.set_status(id, status).await?)
}

pub async fn delete_match(pool: &PgPool, principal: &Principal, id: Uuid) -> WebResult<()> {
    let repo = MatchRepository::new(pool);
    authorize_existing(&repo, principal, Action::Delete, id).await?;

    Ok(repo.delete(id).await?)
}
