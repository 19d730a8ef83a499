use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_league, delete_league, get_league, get_standings, get_top_scorers, list_leagues,
    update_league,
};
use crate::middleware::auth::{AuthState, require_auth};

pub fn routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_league))
        .route("/:slug", put(update_league))
        .route("/:slug", delete(delete_league))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    Router::new()
        .route("/", get(list_leagues))
        .route("/:slug", get(get_league))
        .route("/:slug/standings", get(get_standings))
        .route("/:slug/scorers", get(get_top_scorers))
        .merge(protected)
}
