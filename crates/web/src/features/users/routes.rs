use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{create_user, delete_user, get_user, list_users, update_user};
use crate::middleware::auth::{AuthState, require_auth};

/// Every user endpoint requires authentication
pub fn routes(auth: AuthState) -> Router<Database> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
}
