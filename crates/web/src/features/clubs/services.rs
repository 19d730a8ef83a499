use sqlx::PgPool;
use storage::{
    dto::club::{ClubFilter, CreateClubRequest, UpdateClubRequest},
    models::Club,
    repository::club::ClubRepository,
    services::access::{Action, Principal, Resource, authorize},
};

use crate::error::WebResult;

fn scope(club: &Club) -> Resource {
    Resource::Club {
        league_id: club.league_id,
        club_id: Some(club.club_id),
    }
}

pub async fn list_clubs(pool: &PgPool, filter: &ClubFilter) -> WebResult<(Vec<Club>, i64)> {
    Ok(ClubRepository::new(pool).list(filter).await?)
}

pub async fn get_club_by_slug(pool: &PgPool, slug: &str) -> WebResult<Club> {
    Ok(ClubRepository::new(pool).find_by_slug(slug).await?)
}

pub async fn create_club(
    pool: &PgPool,
    principal: &Principal,
    req: &CreateClubRequest,
) -> WebResult<Club> {
    authorize(
        principal,
        Action::Create,
        &Resource::Club {
            league_id: req.league_id,
            club_id: None,
        },
    )?;

    Ok(ClubRepository::new(pool).create(req).await?)
}

pub async fn update_club(
    pool: &PgPool,
    principal: &Principal,
    slug: &str,
    req: &UpdateClubRequest,
) -> WebResult<Club> {
    let repo = ClubRepository::new(pool);
    let existing = repo.find_by_slug(slug).await?;

    authorize(principal, Action::Update, &scope(&existing))?;

    // Moving a club to another league needs rights over the destination too
    if req.league_id.is_some() && req.league_id != existing.league_id {
        authorize(
            principal,
            Action::Update,
            &Resource::Club {
                league_id: req.league_id,
                club_id: Some(existing.club_id),
            },
        )?;
    }

    Ok(repo.update(&existing, req).await?)
}

pub async fn delete_club(pool: &PgPool, principal: &Principal, slug: &str) -> WebResult<()> {
    let repo = ClubRepository::new(pool);
    let club = repo.find_by_slug(slug).await?;

    authorize(principal, Action::Delete, &scope(&club))?;

    Ok(repo.delete(club.club_id).await?)
}
