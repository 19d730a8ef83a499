use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{create_team, delete_team, get_team, list_teams, update_team};
use crate::middleware::auth::{AuthState, require_auth};

pub fn routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_team))
        .route("/:id", put(update_team))
        .route("/:id", delete(delete_team))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    Router::new()
        .route("/", get(list_teams))
        .route("/:id", get(get_team))
        .merge(protected)
}
