use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{create_club, delete_club, get_club, list_clubs, update_club};
use crate::middleware::auth::{AuthState, require_auth};

pub fn routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_club))
        .route("/:slug", put(update_club))
        .route("/:slug", delete(delete_club))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    Router::new()
        .route("/", get(list_clubs))
        .route("/:slug", get(get_club))
        .merge(protected)
}
