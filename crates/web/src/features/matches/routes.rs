use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_match, delete_match, finish_match, get_match, get_match_detailed, list_matches,
    start_match, update_match,
};
use crate::middleware::auth::{AuthState, require_auth};

pub fn routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_match))
        .route("/:id", put(update_match))
        .route("/:id", delete(delete_match))
        .route("/:id/start", post(start_match))
        .route("/:id/finish", post(finish_match))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    Router::new()
        .route("/", get(list_matches))
        .route("/:id", get(get_match))
        .route("/:id/detailed", get(get_match_detailed))
        .merge(protected)
}
