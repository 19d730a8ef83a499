use axum::{
    Extension, Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{login, me};
use crate::middleware::auth::{AuthState, require_auth};

pub fn routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_auth));

    Router::new()
        .route("/login", post(login))
        .layer(Extension(auth.keys))
        .merge(protected)
}
