use sqlx::PgPool;
use storage::{
    dto::common::PaginationParams,
    dto::league::{CreateLeagueRequest, StandingRow, TopScorerEntry, UpdateLeagueRequest},
    models::{League, Sport},
    repository::{league::LeagueRepository, stats::StatsRepository},
    services::access::{Action, Principal, Resource, authorize},
};

use crate::error::WebResult;

pub async fn list_leagues(pool: &PgPool, page: PaginationParams) -> WebResult<(Vec<League>, i64)> {
    Ok(LeagueRepository::new(pool).list(page).await?)
}

pub async fn get_league_by_slug(pool: &PgPool, slug: &str) -> WebResult<League> {
    Ok(LeagueRepository::new(pool).find_by_slug(slug).await?)
}

pub async fn create_league(
    pool: &PgPool,
    principal: &Principal,
    req: &CreateLeagueRequest,
) -> WebResult<League> {
    authorize(principal, Action::Create, &Resource::League { league_id: None })?;

    Ok(LeagueRepository::new(pool).create(req).await?)
}

pub async fn update_league(
    pool: &PgPool,
    principal: &Principal,
    slug: &str,
    req: &UpdateLeagueRequest,
) -> WebResult<League> {
    let repo = LeagueRepository::new(pool);
    let existing = repo.find_by_slug(slug).await?;

    authorize(
        principal,
        Action::Update,
        &Resource::League {
            league_id: Some(existing.league_id),
        },
    )?;

    Ok(repo.update(&existing, req).await?)
}

pub async fn delete_league(pool: &PgPool, principal: &Principal, slug: &str) -> WebResult<()> {
    let repo = LeagueRepository::new(pool);
    let league = repo.find_by_slug(slug).await?;

    authorize(
        principal,
        Action::Delete,
        &Resource::League {
            league_id: Some(league.league_id),
        },
    )?;

    Ok(repo.delete(league.league_id).await?)
}

pub async fn get_standings(pool: &PgPool, slug: &str, sport: Sport) -> WebResult<Vec<StandingRow>> {
    let league = LeagueRepository::new(pool).find_by_slug(slug).await?;

    Ok(StatsRepository::new(pool).standings(&league, sport).await?)
}

pub async fn get_top_scorers(
    pool: &PgPool,
    slug: &str,
    sport: Option<Sport>,
    limit: u32,
) -> WebResult<Vec<TopScorerEntry>> {
    let league = LeagueRepository::new(pool).find_by_slug(slug).await?;

    Ok(StatsRepository::new(pool)
        .top_scorers(&league, sport, limit)
        .await?)
}
