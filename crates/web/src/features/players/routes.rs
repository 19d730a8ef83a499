use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_player, create_players, delete_player, get_player, get_player_stats, list_players,
    update_player,
};
use crate::middleware::auth::{AuthState, require_auth};

pub fn routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_player))
        .route("/bulk", post(create_players))
        .route("/:id", put(update_player))
        .route("/:id", delete(delete_player))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    Router::new()
        .route("/", get(list_players))
        .route("/:id", get(get_player))
        .route("/:id/stats", get(get_player_stats))
        .merge(protected)
}
