use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{delete_event, list_events, record_event};
use crate::middleware::auth::{AuthState, require_auth};

/// Timeline routes, merged under `/api/matches`
pub fn match_routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/:id/events", post(record_event))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    Router::new()
        .route("/:id/events", get(list_events))
        .merge(protected)
}

pub fn routes(auth: AuthState) -> Router<Database> {
    Router::new()
        .route("/:id", delete(delete_event))
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
}
