use utoipa::OpenApi;

use crate::features::{auth, clubs, events, leagues, matches, players, teams, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login,
        auth::handlers::me,
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::create_user,
        users::handlers::update_user,
        users::handlers::delete_user,
        leagues::handlers::list_leagues,
        leagues::handlers::get_league,
        leagues::handlers::get_standings,
        leagues::handlers::get_top_scorers,
        leagues::handlers::create_league,
        leagues::handlers::update_league,
        leagues::handlers::delete_league,
        clubs::handlers::list_clubs,
        clubs::handlers::get_club,
        clubs::handlers::create_club,
        clubs::handlers::update_club,
        clubs::handlers::delete_club,
        teams::handlers::list_teams,
        teams::handlers::get_team,
        teams::handlers::create_team,
        teams::handlers::update_team,
        teams::handlers::delete_team,
        players::handlers::list_players,
        players::handlers::get_player,
        players::handlers::get_player_stats,
        players::handlers::create_player,
        players::handlers::create_players,
        players::handlers::update_player,
        players::handlers::delete_player,
        matches::handlers::list_matches,
        matches::handlers::get_match,
        matches::handlers::get_match_detailed,
        matches::handlers::create_match,
        matches::handlers::update_match,
        matches::handlers::start_match,
        matches::handlers::finish_match,
        matches::handlers::delete_match,
        events::handlers::list_events,
        events::handlers::record_event,
        events::handlers::delete_event,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::user::CreateUserRequest,
            storage::dto::user::UpdateUserRequest,
            storage::dto::user::UserResponse,
            storage::dto::user::LoginRequest,
            storage::dto::user::LoginResponse,
            storage::dto::league::CreateLeagueRequest,
            storage::dto::league::UpdateLeagueRequest,
            storage::dto::league::StandingRow,
            storage::dto::league::TopScorerEntry,
            storage::dto::club::CreateClubRequest,
            storage::dto::club::UpdateClubRequest,
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::player::CreatePlayerRequest,
            storage::dto::player::NewPlayer,
            storage::dto::player::CreatePlayersRequest,
            storage::dto::player::UpdatePlayerRequest,
            storage::dto::player::EventTypeCount,
            storage::dto::player::PlayerStats,
            storage::dto::matches::CreateMatchRequest,
            storage::dto::matches::UpdateMatchRequest,
            storage::dto::matches::MatchDetailResponse,
            storage::dto::event::CreateEventRequest,
            storage::models::League,
            storage::models::Club,
            storage::models::Team,
            storage::models::Player,
            storage::models::Match,
            storage::models::Event,
            storage::models::Role,
            storage::models::Sport,
            storage::models::MatchStatus,
            storage::models::EventType,
        )
    ),
    tags(
        (name = "auth", description = "Login and current user"),
        (name = "users", description = "Admin accounts, ADMIN_APP only"),
        (name = "leagues", description = "Leagues, standings and top scorers"),
        (name = "clubs", description = "Clubs"),
        (name = "teams", description = "Teams"),
        (name = "players", description = "Players and player statistics"),
        (name = "matches", description = "Fixtures, results and match lifecycle"),
        (name = "events", description = "In-match events and live score"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_write_route_documents_bearer_auth() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));

        let path = doc
            .paths
            .paths
            .get("/api/matches/{id}/events")
            .expect("events path");
        assert!(path.get.is_some());
        assert!(path.post.as_ref().and_then(|op| op.security.as_ref()).is_some());
    }
}
